//! In-memory house repository.
//!
//! Loaded once from JSON, either the seed embedded in the binary or a file
//! named by configuration. Records are validated on load.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use super::repository::HouseRepository;
use crate::models::House;

const SEED_HOUSES: &str = include_str!("../../data/houses.json");

#[derive(Debug, Clone)]
pub struct LocalRepository {
    houses: Vec<House>,
}

impl LocalRepository {
    /// Repository over already-built records.
    pub fn new(houses: Vec<House>) -> RepositoryResult<Self> {
        validate_houses(&houses)?;
        Ok(Self { houses })
    }

    /// Repository over the embedded seed directory.
    pub fn seeded() -> RepositoryResult<Self> {
        Self::from_json(SEED_HOUSES)
    }

    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        let houses: Vec<House> = serde_json::from_str(json)?;
        Self::new(houses)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                e.to_string(),
                ErrorContext::new("load_houses").with_details(path.display().to_string()),
            )
        })?;
        let repo = Self::from_json(&json)?;
        info!(
            "Loaded {} houses from {}",
            repo.houses.len(),
            path.display()
        );
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }
}

fn validate_houses(houses: &[House]) -> RepositoryResult<()> {
    let mut seen = HashSet::new();
    for house in houses {
        house.validate().map_err(|msg| {
            RepositoryError::validation_with_context(
                msg,
                ErrorContext::new("validate_house").with_entity_id(&house.id),
            )
        })?;
        if !seen.insert(house.id.as_str()) {
            return Err(RepositoryError::validation_with_context(
                "Duplicate house id",
                ErrorContext::new("validate_house").with_entity_id(&house.id),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl HouseRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_houses(&self) -> RepositoryResult<Vec<House>> {
        Ok(self.houses.clone())
    }

    async fn get_house(&self, id: &str) -> RepositoryResult<House> {
        self.houses
            .iter()
            .find(|house| house.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("House '{}' not found", id),
                    ErrorContext::new("get_house").with_entity_id(id),
                )
            })
    }
}
