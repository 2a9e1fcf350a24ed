// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Multiverse Catalog
//!
//! A typed, paginating client for the public Rick and Morty character
//! catalog, plus the presentation state a browser needs on top of it.
//!
//! ## Features
//!
//! - **Filtered listing**: name, status, gender, species and type filters
//!   against `GET /character`, continued through the `next` reference
//! - **Episode windows**: a character's episode references resolved 20 at a
//!   time, concurrently, and returned in episode order
//! - **"Load more" views**: at most one fetch in flight, append on success,
//!   unchanged state on failure
//! - **Resilient HTTP**: retries with backoff, `Retry-After`, client-side
//!   rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multiverse_catalog::catalog::{CatalogApi, CatalogClient};
//! use multiverse_catalog::config::BrowserConfig;
//! use multiverse_catalog::pagination::{CharacterFilter, CharacterPaginator};
//! use multiverse_catalog::model::Status;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> multiverse_catalog::Result<()> {
//!     let api: Arc<dyn CatalogApi> = Arc::new(CatalogClient::from_config(&BrowserConfig::default())?);
//!     let filter = CharacterFilter::new().with_name("rick").with_status(Status::Alive);
//!
//!     let page = CharacterPaginator::new(api).try_fetch(&filter, 1).await?;
//!     for character in &page.results {
//!         println!("{} ({})", character.name, character.species);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  cli (clap / axum)                                       │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────┐
//! │  store: CharacterStore, ListingView, EpisodeListView     │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────┐
//! │  pagination: CharacterPaginator, EpisodeWindowPaginator  │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬────────────────┐
//! │ catalog      │ http                     │ model          │
//! │ CatalogApi   │ retry, backoff, governor │ Character      │
//! │ CatalogClient│                          │ Episode        │
//! └──────────────┴──────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the catalog client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Browser configuration
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Character and episode records
pub mod model;

/// Catalog access trait and REST client
pub mod catalog;

/// Character listing and episode window paginators
pub mod pagination;

/// Presentation state and "load more" views
pub mod store;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod fixtures;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::{CatalogApi, CatalogClient};
pub use config::BrowserConfig;
pub use model::{Character, CharacterPage, Episode, Gender, PageInfo, Status};
pub use pagination::{CharacterFilter, CharacterPaginator, EpisodeWindowPaginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
