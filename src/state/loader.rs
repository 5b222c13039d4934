// Projects loader: cache check, fetch-or-skip, render.
// Every path ends with the mount point showing cards, the empty view, or the error view.

use chrono::Utc;

use crate::cache::{CacheStore, Lookup};
use crate::error::CardsError;
use crate::github::{RepoSource, Repository};
use crate::ui::{Locale, MAX_CARDS, Page, View, ViewAction, render_view};

/// Default id of the mount point element.
pub const DEFAULT_CONTAINER_ID: &str = "github-projects";

/// How and where the widget renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub container_id: String,
    pub max_cards: usize,
    pub locale: Locale,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            max_cards: MAX_CARDS,
            locale: Locale::default(),
        }
    }
}

/// Terminal state of one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page has no mount point; nothing was done.
    NoMount,
    /// Rendered from a fresh snapshot without touching the network.
    Cached { shown: usize },
    /// Fetched, stored, and rendered.
    Fetched { shown: usize },
    /// Fetch failed; rendered an expired snapshot instead.
    Stale { shown: usize },
    /// Fetch failed with no snapshot; the error view is showing.
    Failed { message: String },
}

impl LoadOutcome {
    /// The action the rendered view offers, if any.
    pub fn action(&self) -> Option<ViewAction> {
        match self {
            LoadOutcome::Failed { .. } => Some(ViewAction::Retry),
            _ => None,
        }
    }
}

/// Orchestrates the snapshot, the listing source, and the page.
pub struct ProjectsLoader<S, C, P> {
    source: S,
    cache: C,
    page: P,
    settings: DisplaySettings,
}

impl<S, C, P> ProjectsLoader<S, C, P>
where
    S: RepoSource,
    C: CacheStore,
    P: Page,
{
    pub fn new(source: S, cache: C, page: P, settings: DisplaySettings) -> Self {
        Self {
            source,
            cache,
            page,
            settings,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Load and render the project list.
    ///
    /// With `force_refresh` unset, a fresh snapshot is rendered directly.
    /// Otherwise the listing is fetched; on failure an expired snapshot is
    /// used if one exists, else the error view is shown.
    pub async fn load(&mut self, force_refresh: bool) -> LoadOutcome {
        if !self.page.has_element(&self.settings.container_id) {
            tracing::debug!(id = %self.settings.container_id, "mount point not found");
            return LoadOutcome::NoMount;
        }

        // An expired snapshot is removed by the lookup but kept here for the failure path.
        let mut expired = None;
        if !force_refresh {
            match self.cache.lookup() {
                Lookup::Fresh(repos) => {
                    tracing::info!(count = repos.len(), "using cached repositories");
                    let shown = self.show_repos(&repos);
                    return LoadOutcome::Cached { shown };
                }
                Lookup::Expired(repos) => expired = Some(repos),
                Lookup::Miss => {}
            }
        }

        self.show(&View::Loading);

        match self.source.fetch_repos().await {
            Ok(repos) => {
                self.cache.write(&repos);
                tracing::info!(count = repos.len(), "cached repositories");
                let shown = self.show_repos(&repos);
                LoadOutcome::Fetched { shown }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load repositories");

                if let Some(repos) = expired.or_else(|| self.cache.read_stale()) {
                    tracing::warn!("falling back to expired cache");
                    let shown = self.show_repos(&repos);
                    return LoadOutcome::Stale { shown };
                }

                let message = self.failure_message(&e);
                self.show(&View::error(message.clone()));
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Run the handler registered for a view action.
    pub async fn handle(&mut self, action: ViewAction) -> LoadOutcome {
        match action {
            ViewAction::Retry => self.load(true).await,
        }
    }

    fn failure_message(&self, err: &CardsError) -> String {
        let locale = self.settings.locale;
        match err {
            CardsError::RateLimited { reset_at } => locale.rate_limited(reset_at),
            _ => locale.load_failed().to_string(),
        }
    }

    fn show_repos(&mut self, repos: &[Repository]) -> usize {
        let view = View::from_repos(repos, self.settings.max_cards);
        let shown = match &view {
            View::Cards(cards) => cards.len(),
            _ => 0,
        };
        self.show(&view);
        shown
    }

    fn show(&mut self, view: &View<'_>) {
        let html = render_view(view, &Utc::now(), self.settings.locale);
        if let Err(e) = self.page.set_inner_html(&self.settings.container_id, &html) {
            tracing::error!(error = %e, "failed to render into page");
        }
    }
}
