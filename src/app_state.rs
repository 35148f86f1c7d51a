//! Shared application state injected into all Axum handlers.

use crate::domain::EventBus;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Bus that producers publish to and subscriber sessions register with.
    pub event_bus: EventBus,
}

impl AppState {
    /// Creates state around an existing bus.
    #[must_use]
    pub const fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}
