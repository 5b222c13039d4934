// GitHub API module.
// Provides the client, the repository listing, and the record type it returns.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::{DEFAULT_PER_PAGE, RepoSource, UserRepoListing};
pub use types::*;
