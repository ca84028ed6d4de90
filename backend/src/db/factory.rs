//! Repository factory for dependency injection.
//!
//! Picks the house source from runtime configuration.

use std::sync::Arc;

use tracing::info;

use super::error::RepositoryResult;
use super::local::LocalRepository;
use super::repository::HouseRepository;
use crate::config::VenueSettings;

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use halloween_route::config::AppConfig;
/// use halloween_route::db::RepositoryFactory;
///
/// let config = AppConfig::load()?;
/// let repo = RepositoryFactory::from_settings(&config.venues)?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Repository over `venues.houses_path` when set, otherwise the embedded seed.
    pub fn from_settings(venues: &VenueSettings) -> RepositoryResult<Arc<dyn HouseRepository>> {
        let repo = match &venues.houses_path {
            Some(path) => LocalRepository::from_file(path)?,
            None => {
                let repo = LocalRepository::seeded()?;
                info!("Using embedded house seed ({} houses)", repo.len());
                repo
            }
        };
        Ok(Arc::new(repo))
    }

    /// Repository over the embedded seed.
    pub fn create_local() -> RepositoryResult<Arc<dyn HouseRepository>> {
        Ok(Arc::new(LocalRepository::seeded()?))
    }
}
