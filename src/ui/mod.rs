// UI module for rendering the project widget.
// Maps loader states to HTML fragments and writes them into a page's mount point.

pub mod cards;
pub mod colors;
pub mod format;
pub mod locale;
pub mod page;

use chrono::{DateTime, Utc};

use crate::github::Repository;

pub use cards::{MAX_CARDS, escape_html, rank_repos, render_card};
pub use colors::{DEFAULT_LANGUAGE_COLOR, language_color};
pub use format::{format_number, format_relative_date};
pub use locale::Locale;
pub use page::{HtmlDocument, HtmlFile, Page};

/// Actions a rendered view can offer the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Reload, bypassing the fresh cache.
    Retry,
}

impl ViewAction {
    /// Value of the `data-action` attribute on the action element.
    pub fn name(&self) -> &'static str {
        match self {
            ViewAction::Retry => "retry",
        }
    }
}

/// Everything the mount point can show.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Loading,
    /// Already ranked and truncated.
    Cards(Vec<&'a Repository>),
    /// Nothing left after filtering. Not an error, offers no action.
    Empty,
    Error { message: String, action: ViewAction },
}

impl<'a> View<'a> {
    /// Rank `repos` and pick the cards view, or the empty view when nothing survives.
    pub fn from_repos(repos: &'a [Repository], max_cards: usize) -> Self {
        let ranked = rank_repos(repos, max_cards);
        if ranked.is_empty() {
            View::Empty
        } else {
            View::Cards(ranked)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        View::Error {
            message: message.into(),
            action: ViewAction::Retry,
        }
    }

    /// The action offered by this view, if any.
    pub fn action(&self) -> Option<ViewAction> {
        match self {
            View::Error { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// Render a view to the HTML that replaces the mount point's content.
pub fn render_view(view: &View<'_>, now: &DateTime<Utc>, locale: Locale) -> String {
    match view {
        View::Loading => format!(
            r#"<div class="loading-placeholder"><p>{}</p></div>"#,
            locale.loading()
        ),
        View::Cards(repos) => repos
            .iter()
            .map(|repo| render_card(repo, now, locale))
            .collect(),
        View::Empty => format!(
            r#"<div class="project-empty" style="text-align: center; padding: 2rem;"><p>{}</p></div>"#,
            locale.no_projects()
        ),
        View::Error { message, action } => format!(
            concat!(
                r#"<div class="project-error" style="text-align: center; padding: 2rem;">"#,
                r#"<p style="color: #ff6b6b;">{}</p>"#,
                r#"<button type="button" class="btn" data-action="{}" style="margin-top: 1rem;">{}</button>"#,
                r#"</div>"#,
            ),
            escape_html(message),
            action.name(),
            locale.retry()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn repo(name: &str, stars: u64, fork: bool) -> Repository {
        Repository {
            name: name.to_string(),
            html_url: format!("https://github.com/octo/{name}"),
            description: None,
            language: None,
            stargazers_count: stars,
            forks_count: 0,
            pushed_at: Some(now()),
            updated_at: None,
            fork,
        }
    }

    #[test]
    fn test_all_forks_render_empty_view() {
        let repos = vec![repo("a", 1, true), repo("b", 2, true)];
        let view = View::from_repos(&repos, MAX_CARDS);

        assert_eq!(view, View::Empty);
        assert_eq!(view.action(), None);

        let html = render_view(&view, &now(), Locale::En);
        assert!(html.contains("No projects yet"));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_cards_view_concatenates_cards() {
        let repos = vec![repo("low", 1, false), repo("high", 9, false)];
        let html = render_view(&View::from_repos(&repos, MAX_CARDS), &now(), Locale::En);

        assert_eq!(html.matches(r#"class="project-card""#).count(), 2);
        assert!(html.find(">high</a>").unwrap() < html.find(">low</a>").unwrap());
    }

    #[test]
    fn test_error_view_offers_retry_action() {
        let view = View::error("boom");
        assert_eq!(view.action(), Some(ViewAction::Retry));

        let html = render_view(&view, &now(), Locale::En);
        assert!(html.contains("boom"));
        assert!(html.contains(r#"data-action="retry""#));
        assert!(html.contains(">Retry</button>"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_loading_view_localized() {
        let html = render_view(&View::Loading, &now(), Locale::Zh);
        assert!(html.contains("正在加载项目..."));
    }
}
