//! Application state for the HTTP server.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::MapSettings;
use crate::db::HouseRepository;
use crate::services::AvailabilityCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// House directory
    pub repository: Arc<dyn HouseRepository>,
    /// Cached map quota decisions
    pub availability: Arc<AvailabilityCache>,
    /// Wall-clock offset the listed hours are written in
    pub venue_offset: FixedOffset,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn HouseRepository>,
        availability: Arc<AvailabilityCache>,
        venue_offset: FixedOffset,
    ) -> Self {
        Self {
            repository,
            availability,
            venue_offset,
        }
    }

    pub fn map_settings(&self) -> &MapSettings {
        self.availability.gatekeeper().settings()
    }
}
