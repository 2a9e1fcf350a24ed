//! Character grid view: drives the listing paginator and merges into the store

use super::flight::{FetchPhase, InFlight, LoadOutcome};
use super::state::CharacterStore;
use crate::model::CharacterPage;
use crate::pagination::{CharacterFilter, CharacterPaginator};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Paginated character grid
///
/// Holds at most one fetch in flight. Successful pages either replace the
/// store contents (initial load, new filter, reset) or are appended to it
/// (load more). Failed fetches leave the store untouched.
#[derive(Debug)]
pub struct ListingView {
    paginator: CharacterPaginator,
    store: Arc<RwLock<CharacterStore>>,
    in_flight: InFlight,
}

impl ListingView {
    /// Create a view writing into `store`
    pub fn new(paginator: CharacterPaginator, store: Arc<RwLock<CharacterStore>>) -> Self {
        Self {
            paginator,
            store,
            in_flight: InFlight::default(),
        }
    }

    /// Shared handle to the store
    pub fn store(&self) -> Arc<RwLock<CharacterStore>> {
        Arc::clone(&self.store)
    }

    /// Idle or Fetching
    pub fn phase(&self) -> FetchPhase {
        self.in_flight.phase()
    }

    /// Whether the "load more" affordance should be offered
    pub async fn can_load_more(&self) -> bool {
        self.phase() == FetchPhase::Idle && self.store.read().await.page_info().has_next()
    }

    /// Fetch the first page under the store's current filter and replace the listing
    pub async fn load_initial(&self) -> LoadOutcome {
        let filter = self.store.read().await.filter().clone();
        self.replace_with(filter).await
    }

    /// Switch to `filter` and replace the listing with its first page
    pub async fn apply_filter(&self, filter: CharacterFilter) -> LoadOutcome {
        info!(?filter, "Applying character filter");
        self.replace_with(filter).await
    }

    /// Clear the filter and replace the listing with the unfiltered first page
    pub async fn reset(&self) -> LoadOutcome {
        info!("Resetting character filter");
        self.replace_with(CharacterFilter::default()).await
    }

    /// Append the next page, if there is one and nothing else is in flight
    pub async fn load_more(&self) -> LoadOutcome {
        let Some(_guard) = self.in_flight.begin() else {
            debug!("Load more ignored, fetch already in flight");
            return LoadOutcome::Ignored;
        };

        let (next, filter) = {
            let store = self.store.read().await;
            (store.page_info().next.clone(), store.filter().clone())
        };
        let Some(next) = next else {
            return LoadOutcome::Exhausted;
        };

        match self.paginator.try_fetch_next(&next, &filter).await {
            Ok(CharacterPage { info, results }) => {
                let added = results.len();
                let mut store = self.store.write().await;
                store.append_characters(results);
                store.set_page_info(info);
                debug!(added, total = store.characters().len(), "Appended character page");
                LoadOutcome::Loaded { added }
            }
            Err(e) => {
                warn!("Failed to load more characters: {e}");
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn replace_with(&self, filter: CharacterFilter) -> LoadOutcome {
        let Some(_guard) = self.in_flight.begin() else {
            debug!("Listing fetch ignored, fetch already in flight");
            return LoadOutcome::Ignored;
        };

        match self
            .paginator
            .try_fetch(&filter, CharacterPaginator::FIRST_PAGE)
            .await
        {
            Ok(CharacterPage { info, results }) => {
                let added = results.len();
                let mut store = self.store.write().await;
                store.set_filter(filter);
                store.set_characters(results);
                store.set_page_info(info);
                LoadOutcome::Loaded { added }
            }
            Err(e) => {
                warn!("Failed to load characters: {e}");
                LoadOutcome::Failed(e)
            }
        }
    }
}
