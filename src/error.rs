// Error types for repo-cards.
// Covers GitHub API failures, cache and page IO, and configuration problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl From<figment::Error> for CardsError {
    fn from(err: figment::Error) -> Self {
        CardsError::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CardsError>;
