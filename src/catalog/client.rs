//! Catalog access trait and its REST implementation

use crate::config::BrowserConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::model::{Character, CharacterPage, Episode};
use crate::types::QueryParams;
use async_trait::async_trait;
use tracing::debug;

/// Read-only access to the character catalog
///
/// The paginators and views only talk to the catalog through this trait, so
/// they can be driven by the REST client or by an in-memory catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /character` with the given query parameters
    async fn list_characters(&self, query: &QueryParams) -> Result<CharacterPage>;

    /// `GET /character/{id}`
    async fn character(&self, id: u32) -> Result<Character>;

    /// Resolve one episode reference (absolute URL or path relative to the base URL)
    async fn episode(&self, reference: &str) -> Result<Episode>;
}

/// REST client for the public catalog service
#[derive(Debug)]
pub struct CatalogClient {
    http: HttpClient,
}

impl CatalogClient {
    /// Path of the character collection
    pub const CHARACTER_PATH: &'static str = "/character";

    /// Create a client on top of an HTTP client configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(config)?,
        })
    }

    /// Create a client from browser configuration
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        Self::new(config.to_http_config())
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_characters(&self, query: &QueryParams) -> Result<CharacterPage> {
        debug!(?query, "Listing characters");
        self.http.get_json(Self::CHARACTER_PATH, query).await
    }

    async fn character(&self, id: u32) -> Result<Character> {
        debug!(id, "Fetching character");
        self.http
            .get_json(&format!("{}/{id}", Self::CHARACTER_PATH), &QueryParams::new())
            .await
    }

    async fn episode(&self, reference: &str) -> Result<Episode> {
        debug!(reference, "Resolving episode");
        self.http.get_json(reference, &QueryParams::new()).await
    }
}
