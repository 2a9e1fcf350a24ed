//! Idle/Fetching tracking shared by the paginated views

use crate::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fetch state of a paginated view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch in flight
    Idle,
    /// One fetch in flight
    Fetching,
}

/// Outcome of a load request on a paginated view
#[derive(Debug)]
pub enum LoadOutcome {
    /// A page was fetched and merged
    Loaded {
        /// Items the page contributed
        added: usize,
    },
    /// Another fetch was in flight; nothing was requested
    Ignored,
    /// No continuation exists; nothing was requested
    Exhausted,
    /// The fetch failed; view state is unchanged
    Failed(Error),
}

impl LoadOutcome {
    /// Whether a page was merged
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// The failure notice to surface, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Single in-flight slot
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    /// Claim the slot, or `None` if a fetch is already running
    pub(crate) fn begin(&self) -> Option<FlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard(&self.0))
    }

    pub(crate) fn phase(&self) -> FetchPhase {
        if self.0.load(Ordering::Acquire) {
            FetchPhase::Fetching
        } else {
            FetchPhase::Idle
        }
    }
}

/// Returns the view to Idle when dropped, on success and failure alike
pub(crate) struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
