//! Episode list view for one character's detail page

use super::flight::{FetchPhase, InFlight, LoadOutcome};
use crate::error::Error;
use crate::model::{Character, Episode};
use crate::pagination::{last_page, EpisodeWindowPaginator};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct EpisodeListState {
    episodes: Vec<Episode>,
    page: u32,
}

/// Accumulated episode windows for one character
///
/// `page` is the last window merged (0 before the first load). It advances by
/// exactly one per successful load and never moves on failure.
#[derive(Debug)]
pub struct EpisodeListView {
    paginator: EpisodeWindowPaginator,
    refs: Vec<String>,
    state: RwLock<EpisodeListState>,
    in_flight: InFlight,
}

impl EpisodeListView {
    /// Create a view over a character's episode references
    pub fn new(paginator: EpisodeWindowPaginator, character: &Character) -> Self {
        Self::with_refs(paginator, character.episode.clone())
    }

    /// Create a view over an explicit reference list
    pub fn with_refs(paginator: EpisodeWindowPaginator, refs: Vec<String>) -> Self {
        Self {
            paginator,
            refs,
            state: RwLock::new(EpisodeListState::default()),
            in_flight: InFlight::default(),
        }
    }

    /// Total episode appearances
    pub fn total(&self) -> usize {
        self.refs.len()
    }

    /// Number of windows
    pub fn last_page(&self) -> u32 {
        last_page(self.refs.len())
    }

    /// Last window merged
    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    /// Episodes merged so far
    pub async fn episodes(&self) -> Vec<Episode> {
        self.state.read().await.episodes.clone()
    }

    /// Idle or Fetching
    pub fn phase(&self) -> FetchPhase {
        self.in_flight.phase()
    }

    /// Whether the "load more" affordance should be offered
    pub async fn can_load_more(&self) -> bool {
        self.phase() == FetchPhase::Idle && self.page().await < self.last_page()
    }

    /// Load the first window, replacing anything merged before
    pub async fn load_initial(&self) -> LoadOutcome {
        let Some(_guard) = self.in_flight.begin() else {
            return LoadOutcome::Ignored;
        };
        if self.refs.is_empty() {
            return LoadOutcome::Exhausted;
        }

        match self.paginator.try_fetch_window(&self.refs, 1).await {
            Ok(episodes) => {
                let added = episodes.len();
                let mut state = self.state.write().await;
                state.episodes = episodes;
                state.page = 1;
                LoadOutcome::Loaded { added }
            }
            Err(e) => self.failed(1, e),
        }
    }

    /// Append the next window while `page < last_page`
    pub async fn load_more(&self) -> LoadOutcome {
        let Some(_guard) = self.in_flight.begin() else {
            debug!("Load more episodes ignored, fetch already in flight");
            return LoadOutcome::Ignored;
        };

        let page = self.page().await;
        if page >= self.last_page() {
            return LoadOutcome::Exhausted;
        }
        let next_page = page + 1;

        match self.paginator.try_fetch_window(&self.refs, next_page).await {
            Ok(episodes) => {
                let added = episodes.len();
                let mut state = self.state.write().await;
                state.episodes.extend(episodes);
                state.page = next_page;
                debug!(page = next_page, added, "Appended episode window");
                LoadOutcome::Loaded { added }
            }
            Err(e) => self.failed(next_page, e),
        }
    }

    fn failed(&self, page: u32, error: Error) -> LoadOutcome {
        warn!(page, "Failed to load episodes, please try again: {error}");
        LoadOutcome::Failed(error)
    }
}
