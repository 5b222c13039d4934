// User-facing strings for the rendered widget.
// English is the default; Simplified Chinese is also available.

use serde::{Deserialize, Serialize};

/// Display language for card labels and status views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn today(&self) -> &'static str {
        match self {
            Locale::En => "today",
            Locale::Zh => "今天",
        }
    }

    pub fn days_ago(&self, n: i64) -> String {
        match self {
            Locale::En => format!("{} days ago", n),
            Locale::Zh => format!("{} 天前", n),
        }
    }

    pub fn weeks_ago(&self, n: i64) -> String {
        match self {
            Locale::En => format!("{} weeks ago", n),
            Locale::Zh => format!("{} 周前", n),
        }
    }

    pub fn months_ago(&self, n: i64) -> String {
        match self {
            Locale::En => format!("{} months ago", n),
            Locale::Zh => format!("{} 个月前", n),
        }
    }

    pub fn years_ago(&self, n: i64) -> String {
        match self {
            Locale::En => format!("{} years ago", n),
            Locale::Zh => format!("{} 年前", n),
        }
    }

    pub fn updated_prefix(&self) -> &'static str {
        match self {
            Locale::En => "Updated",
            Locale::Zh => "更新于",
        }
    }

    pub fn no_description(&self) -> &'static str {
        match self {
            Locale::En => "No description",
            Locale::Zh => "暂无描述",
        }
    }

    pub fn no_projects(&self) -> &'static str {
        match self {
            Locale::En => "No projects yet",
            Locale::Zh => "暂无项目",
        }
    }

    pub fn loading(&self) -> &'static str {
        match self {
            Locale::En => "Loading projects...",
            Locale::Zh => "正在加载项目...",
        }
    }

    pub fn load_failed(&self) -> &'static str {
        match self {
            Locale::En => "Failed to load projects, please try again later",
            Locale::Zh => "加载失败，请稍后重试",
        }
    }

    pub fn rate_limited(&self, reset_at: &str) -> String {
        match self {
            Locale::En => format!("GitHub API rate limit exceeded, resets at {} UTC", reset_at),
            Locale::Zh => format!("GitHub API 请求次数已达上限，将于 {} (UTC) 重置", reset_at),
        }
    }

    pub fn retry(&self) -> &'static str {
        match self {
            Locale::En => "Retry",
            Locale::Zh => "重试",
        }
    }
}
