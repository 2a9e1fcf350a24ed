//! Catalog service access
//!
//! Exposes the upstream endpoints this crate reads from:
//! - `GET /character` (query: `page`, `name`, `status`, `species`, `type`, `gender`)
//! - `GET /character/{id}`
//! - episode detail at each URL embedded in a character's episode list

mod client;

pub use client::{CatalogApi, CatalogClient};
