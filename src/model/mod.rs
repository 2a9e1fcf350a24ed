//! Catalog data model
//!
//! Typed schemas for everything the catalog serves. Entities are immutable
//! once decoded; callers replace them wholesale on refetch.

mod character;
mod episode;

pub use character::{Character, CharacterPage, Gender, LocationRef, PageInfo, Status};
pub use episode::{Episode, EpisodeCode};
