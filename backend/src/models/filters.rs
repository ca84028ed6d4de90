//! Filter criteria applied to the house directory.

use serde::{Deserialize, Serialize};

use super::house::{AccessibilityTag, CandyLevel, DietaryTag, ScareLevel};

/// User-selected filter criteria.
///
/// An empty list places no constraint on its dimension. `Default` is the
/// match-everything criteria; the UI starting point lives in
/// [`crate::services::filter_store::FilterStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub scare_levels: Vec<ScareLevel>,
    #[serde(default)]
    pub accessibility: Vec<AccessibilityTag>,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
    #[serde(default)]
    pub candy_levels: Vec<CandyLevel>,
    #[serde(default)]
    pub open_now: bool,
    #[serde(default)]
    pub only_favorites: bool,
}
