//! Repository trait for house directory access.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::House;

/// Read-only access to the house directory.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait HouseRepository: Send + Sync {
    /// Check that the backing store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All houses in listing order, regardless of status.
    async fn list_houses(&self) -> RepositoryResult<Vec<House>>;

    /// A single house by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no house has this id
    async fn get_house(&self, id: &str) -> RepositoryResult<House>;
}
