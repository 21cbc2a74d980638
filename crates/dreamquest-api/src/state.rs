//! Shared application state.

use std::fmt;
use std::sync::Arc;

use dreamquest_core::clock::Clock;
use dreamquest_core::dispatch::JobDispatcher;
use dreamquest_core::store::JobStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Job store shared with the worker.
    pub store: Arc<dyn JobStore>,
    /// Work queue for accepted jobs.
    pub dispatcher: Arc<dyn JobDispatcher>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        store: Arc<dyn JobStore>,
        dispatcher: Arc<dyn JobDispatcher>,
    ) -> Self {
        Self {
            clock,
            store,
            dispatcher,
        }
    }
}
