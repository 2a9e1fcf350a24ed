//! Presentation state and the "load more" protocol
//!
//! Each paginated view is either Idle or Fetching. A load request while
//! Fetching is ignored. On success new results are appended and the
//! continuation (`next` reference or window number) advances by one; on
//! failure nothing changes and the caller gets the error to show.
//!
//! - [`CharacterStore`]: listing, page info and active filter
//! - [`ListingView`]: character grid over the listing paginator
//! - [`EpisodeListView`]: episode list over the window paginator

mod episodes;
mod flight;
mod listing;
mod state;

pub use episodes::EpisodeListView;
pub use flight::{FetchPhase, LoadOutcome};
pub use listing::ListingView;
pub use state::CharacterStore;
