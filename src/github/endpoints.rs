// GitHub API endpoint functions.
// Provides the user repository listing and the source seam the loader fetches through.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

/// Default page size for the repository listing.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Anything that can produce one account's repository listing.
///
/// Exactly one request per call, no retry. Tests substitute canned sources.
#[async_trait]
pub trait RepoSource: Send {
    async fn fetch_repos(&mut self) -> Result<Vec<Repository>>;
}

impl GitHubClient {
    /// Get public repositories for a user, most recently updated first.
    pub async fn get_user_repos(&mut self, username: &str, per_page: u32) -> Result<Vec<Repository>> {
        let per_page = per_page.to_string();
        let params = [("sort", "updated"), ("per_page", per_page.as_str())];
        let response = self
            .get_with_params(&format!("/users/{}/repos", username), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }
}

/// The fixed listing request: one account, one page.
pub struct UserRepoListing {
    client: GitHubClient,
    username: String,
    per_page: u32,
}

impl UserRepoListing {
    pub fn new(client: GitHubClient, username: impl Into<String>, per_page: u32) -> Self {
        Self {
            client,
            username: username.into(),
            per_page,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait]
impl RepoSource for UserRepoListing {
    async fn fetch_repos(&mut self) -> Result<Vec<Repository>> {
        tracing::debug!(user = %self.username, per_page = self.per_page, "fetching repositories");
        self.client
            .get_user_repos(&self.username, self.per_page)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardsError;
    use mockito::{Matcher, Server};

    fn listing_body() -> String {
        serde_json::json!([
            {
                "name": "alpha",
                "html_url": "https://github.com/octo/alpha",
                "description": "first",
                "language": "Rust",
                "stargazers_count": 5,
                "forks_count": 1,
                "pushed_at": "2024-01-01T00:00:00Z",
                "fork": false
            },
            {
                "name": "beta",
                "html_url": "https://github.com/octo/beta",
                "description": null,
                "language": null,
                "stargazers_count": 1000,
                "forks_count": 0,
                "pushed_at": "2024-01-02T00:00:00Z",
                "fork": true
            }
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_fetch_repos_sends_listing_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octo/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sort".into(), "updated".into()),
                Matcher::UrlEncoded("per_page".into(), "30".into()),
            ]))
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-ratelimit-remaining", "59")
            .with_body(listing_body())
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(&server.url()).unwrap();
        let mut listing = UserRepoListing::new(client, "octo", DEFAULT_PER_PAGE);
        let repos = listing.fetch_repos().await.unwrap();

        mock.assert_async().await;
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "alpha");
        assert!(repos[1].fork);
        assert_eq!(listing.client.rate_limit().remaining, 59);
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octo/repos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "0")
            .with_body(r#"{"message":"API rate limit exceeded"}"#)
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(&server.url()).unwrap();
        let mut listing = UserRepoListing::new(client, "octo", DEFAULT_PER_PAGE);
        let err = listing.fetch_repos().await.unwrap_err();

        match err {
            CardsError::RateLimited { reset_at } => assert_eq!(reset_at, "00:00:00"),
            other => panic!("expected rate limit error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_other() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octo/repos")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(&server.url()).unwrap();
        let mut listing = UserRepoListing::new(client, "octo", DEFAULT_PER_PAGE);
        let err = listing.fetch_repos().await.unwrap_err();

        assert!(matches!(err, CardsError::Other(ref msg) if msg.starts_with("HTTP 500")));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/nobody/repos")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(&server.url()).unwrap();
        let mut listing = UserRepoListing::new(client, "nobody", DEFAULT_PER_PAGE);
        let err = listing.fetch_repos().await.unwrap_err();

        assert!(matches!(err, CardsError::NotFound(_)));
    }
}
