//! Character listing paginator
//!
//! Retrieves one page of characters for a filter, either by page number or by
//! following a `next` continuation. The plain entry points never fail: any
//! transport, status or decode error becomes the empty sentinel page.

use super::filter::{CharacterFilter, Continuation};
use crate::catalog::CatalogApi;
use crate::error::Result;
use crate::model::CharacterPage;
use crate::types::QueryParams;
use std::sync::Arc;
use tracing::{debug, warn};

/// Paginator over `GET /character`
#[derive(Clone)]
pub struct CharacterPaginator {
    api: Arc<dyn CatalogApi>,
}

impl CharacterPaginator {
    /// First page number of the listing
    pub const FIRST_PAGE: u32 = 1;

    /// Create a paginator over a catalog
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Query parameters for `page` of `filter` (page 0 is treated as page 1)
    pub fn request_params(filter: &CharacterFilter, page: u32) -> QueryParams {
        let mut params = filter.query_params();
        params.insert("page".to_string(), page.max(Self::FIRST_PAGE).to_string());
        params
    }

    /// Fetch one page, returning the sentinel on failure
    pub async fn fetch(&self, filter: &CharacterFilter, page: u32) -> CharacterPage {
        self.try_fetch(filter, page)
            .await
            .unwrap_or_else(|e| sentinel(&e))
    }

    /// Fetch the page a `next` reference points at, returning the sentinel on failure
    pub async fn fetch_next(&self, next: &str, filter: &CharacterFilter) -> CharacterPage {
        self.try_fetch_next(next, filter)
            .await
            .unwrap_or_else(|e| sentinel(&e))
    }

    /// Fetch one page, surfacing failures
    ///
    /// A 404 is the catalog's way of saying "no character matches" and comes
    /// back as an empty page rather than an error.
    pub async fn try_fetch(&self, filter: &CharacterFilter, page: u32) -> Result<CharacterPage> {
        let params = Self::request_params(filter, page);
        self.request(&params).await
    }

    /// Follow a `next` reference under the active filter, surfacing failures
    pub async fn try_fetch_next(
        &self,
        next: &str,
        filter: &CharacterFilter,
    ) -> Result<CharacterPage> {
        let params = Continuation::parse(next)?.merge_with(filter)?;
        self.request(&params).await
    }

    async fn request(&self, params: &QueryParams) -> Result<CharacterPage> {
        match self.api.list_characters(params).await {
            Ok(page) => {
                debug!(
                    count = page.info.count,
                    received = page.results.len(),
                    has_next = page.info.has_next(),
                    "Fetched character page"
                );
                Ok(page)
            }
            Err(e) if e.is_not_found() => {
                debug!(?params, "No characters match");
                Ok(CharacterPage::empty())
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for CharacterPaginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterPaginator").finish_non_exhaustive()
    }
}

fn sentinel(error: &crate::error::Error) -> CharacterPage {
    warn!("Character listing failed: {error}");
    CharacterPage::empty()
}
