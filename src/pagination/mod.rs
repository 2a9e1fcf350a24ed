//! Pagination module
//!
//! Two instances of the same pattern:
//! - [`CharacterPaginator`]: server-side pages of `GET /character`, continued
//!   through the `next` reference in [`PageInfo`](crate::model::PageInfo)
//! - [`EpisodeWindowPaginator`]: client-side windows of 20 over a character's
//!   episode references, resolved concurrently and sorted by id
//!
//! Each exposes sentinel-returning entry points (`fetch*`) that never fail and
//! `try_*` variants that return [`Result`](crate::Result) for callers that must
//! tell an empty result from a failed one.

mod episodes;
mod filter;
mod listing;

pub use episodes::{
    last_page, window_bounds, EpisodeWindow, EpisodeWindowPaginator, EPISODE_PAGE_SIZE,
};
pub use filter::{CharacterFilter, Continuation};
pub use listing::CharacterPaginator;
