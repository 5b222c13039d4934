// repo-cards library.
// Fetches a GitHub account's repositories, caches a snapshot, and renders ranked project cards.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod state;
pub mod ui;

pub use error::{CardsError, Result};
