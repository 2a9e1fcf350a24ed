//! Episode window paginator
//!
//! A character already carries the full list of its episode references. This
//! paginator slices that list into fixed windows of [`EPISODE_PAGE_SIZE`],
//! resolves every reference of a window concurrently and returns the episodes
//! sorted by id, since reference order does not follow episode numbering.

use crate::catalog::CatalogApi;
use crate::error::{Error, Result};
use crate::model::Episode;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of episodes per window
pub const EPISODE_PAGE_SIZE: usize = 20;

/// Index range of `page` within a reference list of length `len`
///
/// Pages are 1-based; page 0 is treated as page 1. Pages past the end give an
/// empty range.
pub fn window_bounds(len: usize, page: u32) -> Range<usize> {
    let page = page.max(1) as usize;
    let start = (page - 1).saturating_mul(EPISODE_PAGE_SIZE).min(len);
    let end = start.saturating_add(EPISODE_PAGE_SIZE).min(len);
    start..end
}

/// Number of windows needed for `len` references
pub fn last_page(len: usize) -> u32 {
    len.div_ceil(EPISODE_PAGE_SIZE) as u32
}

/// Result of one window fetch
///
/// `status == false` with `result == None` means either the reference list
/// was empty or a reference failed to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeWindow {
    pub status: bool,
    pub result: Option<Vec<Episode>>,
}

impl EpisodeWindow {
    /// The failure / no-data value
    pub fn failed() -> Self {
        Self {
            status: false,
            result: None,
        }
    }

    /// A resolved window
    pub fn loaded(episodes: Vec<Episode>) -> Self {
        Self {
            status: true,
            result: Some(episodes),
        }
    }

    /// Resolved episodes, empty for a failed window
    pub fn episodes(&self) -> &[Episode] {
        self.result.as_deref().unwrap_or_default()
    }
}

/// Paginator over a character's episode references
#[derive(Clone)]
pub struct EpisodeWindowPaginator {
    api: Arc<dyn CatalogApi>,
}

impl EpisodeWindowPaginator {
    /// Create a paginator over a catalog
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Fetch one window, returning [`EpisodeWindow::failed`] on any failure
    pub async fn fetch_window(&self, refs: &[String], page: u32) -> EpisodeWindow {
        match self.try_fetch_window(refs, page).await {
            Ok(episodes) => EpisodeWindow::loaded(episodes),
            Err(Error::EmptyEpisodeList) => EpisodeWindow::failed(),
            Err(e) => {
                warn!(page, "Episode window failed: {e}");
                EpisodeWindow::failed()
            }
        }
    }

    /// Fetch one window, surfacing failures
    ///
    /// All-or-nothing: if any reference fails, the whole window fails.
    pub async fn try_fetch_window(&self, refs: &[String], page: u32) -> Result<Vec<Episode>> {
        if refs.is_empty() {
            return Err(Error::EmptyEpisodeList);
        }

        let bounds = window_bounds(refs.len(), page);
        debug!(page, start = bounds.start, end = bounds.end, "Resolving episode window");

        let requests = refs[bounds].iter().map(|reference| async move {
            self.api
                .episode(reference)
                .await
                .map_err(|e| Error::episode(reference, e.to_string()))
        });
        let mut episodes = try_join_all(requests).await?;
        episodes.sort_by_key(|episode| episode.id);

        Ok(episodes)
    }
}

impl std::fmt::Debug for EpisodeWindowPaginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeWindowPaginator").finish_non_exhaustive()
    }
}
