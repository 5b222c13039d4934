// GitHub API response types.
// Defines the repository record returned by the user repos listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub repository as listed by `/users/{user}/repos`.
///
/// Only the fields needed to rank and render a project card are kept;
/// everything else in the API payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: bool,
}

impl Repository {
    /// Timestamp used for the "updated" label: last push, else last update.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.pushed_at.or(self.updated_at)
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
