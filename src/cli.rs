// Command-line interface.
// Parses arguments, wires the loader to its file-backed collaborators, and runs commands.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::cache::{CacheStore, FileCacheStore, snapshot_path};
use crate::config::{Config, ConfigLoader};
use crate::error::{CardsError, Result};
use crate::github::{GitHubClient, RepoSource, UserRepoListing};
use crate::state::{LoadOutcome, ProjectsLoader};
use crate::ui::{HtmlDocument, HtmlFile, Locale, Page};

#[derive(Parser, Debug)]
#[command(name = "repo-cards")]
#[command(about = "Render a GitHub account's top projects as HTML cards", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./repo-cards.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// GitHub account to list
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Language for labels
    #[arg(short, long, global = true, value_enum)]
    pub locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the project list and render it into the mount point
    Render(RenderArgs),

    /// Inspect or remove the cached snapshot
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// HTML page containing the mount point; prints the fragment to stdout when omitted
    #[arg(short, long)]
    pub page: Option<PathBuf>,

    /// Skip the fresh cache and fetch from GitHub
    #[arg(short, long)]
    pub force_refresh: bool,

    /// Offer to retry on the terminal when loading fails
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show the snapshot's age and size
    Status,
    /// Delete the snapshot
    Clear,
}

impl Cli {
    /// Resolve configuration, with command-line flags taking precedence.
    pub fn config(&self) -> Result<Config> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        if let Some(user) = &self.user {
            config.username = user.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        ConfigLoader::validate(&config)?;
        Ok(config)
    }
}

/// Run the parsed command. Returns whether the command succeeded.
pub async fn run(cli: Cli) -> Result<bool> {
    let config = cli.config()?;
    match cli.command {
        Commands::Render(args) => render(&config, args).await,
        Commands::Cache(CacheCommands::Status) => cache_status(&config),
        Commands::Cache(CacheCommands::Clear) => cache_clear(&config),
    }
}

fn cache_store(config: &Config) -> Result<FileCacheStore> {
    let path = snapshot_path(config.cache_dir.as_deref(), &config.cache_key)
        .ok_or_else(|| CardsError::Other("could not determine cache directory".to_string()))?;
    Ok(FileCacheStore::new(path, config.cache_ttl()))
}

async fn render(config: &Config, args: RenderArgs) -> Result<bool> {
    let client = GitHubClient::with_base_url(&config.api_base)?;
    let source = UserRepoListing::new(client, config.username.clone(), config.per_page);
    let cache = cache_store(config)?;
    let settings = config.display_settings();

    match args.page {
        Some(path) => {
            let page = HtmlFile::open(&path)?;
            let mut loader = ProjectsLoader::new(source, cache, page, settings);
            let outcome = drive(&mut loader, args.force_refresh, args.interactive).await?;
            if outcome == LoadOutcome::NoMount {
                tracing::warn!(
                    page = %path.display(),
                    id = %config.container_id,
                    "page has no mount point, nothing rendered"
                );
            }
            Ok(!matches!(outcome, LoadOutcome::Failed { .. }))
        }
        None => {
            let page = HtmlDocument::with_container(&config.container_id);
            let mut loader = ProjectsLoader::new(source, cache, page, settings);
            let outcome = drive(&mut loader, args.force_refresh, args.interactive).await?;
            if let Some(html) = loader.page().inner_html(&config.container_id) {
                println!("{}", html);
            }
            Ok(!matches!(outcome, LoadOutcome::Failed { .. }))
        }
    }
}

/// Load once, then keep handling the error view's action while the user asks for it.
async fn drive<S, C, P>(
    loader: &mut ProjectsLoader<S, C, P>,
    force_refresh: bool,
    interactive: bool,
) -> Result<LoadOutcome>
where
    S: RepoSource,
    C: CacheStore,
    P: Page,
{
    let mut outcome = loader.load(force_refresh).await;
    report(&outcome);

    let interactive = interactive && io::stdin().is_terminal();
    while interactive {
        let Some(action) = outcome.action() else {
            break;
        };
        let LoadOutcome::Failed { message } = &outcome else {
            break;
        };
        if !confirm(&format!("{} Retry? [y/N] ", message))? {
            break;
        }
        outcome = loader.handle(action).await;
        report(&outcome);
    }

    Ok(outcome)
}

fn report(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::NoMount => {}
        LoadOutcome::Cached { shown } => tracing::info!(shown, "rendered from cache"),
        LoadOutcome::Fetched { shown } => tracing::info!(shown, "rendered fresh listing"),
        LoadOutcome::Stale { shown } => tracing::warn!(shown, "rendered expired cache"),
        LoadOutcome::Failed { message } => tracing::error!(%message, "rendered error view"),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn cache_status(config: &Config) -> Result<bool> {
    let store = cache_store(config)?;
    println!("Cache file: {}", store.path().display());

    match store.status()? {
        Some(status) => {
            let written = DateTime::<Utc>::from_timestamp_millis(status.timestamp)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            println!("Repositories: {}", status.repo_count);
            println!("Written: {}", written);
            println!("Age: {}s", status.age_ms / 1000);
            println!("State: {}", if status.fresh { "fresh" } else { "expired" });
        }
        None => println!("No snapshot"),
    }
    Ok(true)
}

fn cache_clear(config: &Config) -> Result<bool> {
    let store = cache_store(config)?;
    store.clear()?;
    tracing::info!(path = %store.path().display(), "cache cleared");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "repo-cards",
            "--user",
            "octocat",
            "render",
            "--page",
            "index.html",
            "--force-refresh",
        ])
        .unwrap();

        assert_eq!(cli.user.as_deref(), Some("octocat"));
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.page, Some(PathBuf::from("index.html")));
                assert!(args.force_refresh);
                assert!(!args.interactive);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_cache_commands() {
        let cli = Cli::try_parse_from(["repo-cards", "cache", "clear", "--locale", "zh"]).unwrap();
        assert!(matches!(cli.command, Commands::Cache(CacheCommands::Clear)));
        assert_eq!(cli.locale, Some(Locale::Zh));
    }
}
