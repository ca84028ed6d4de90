//! Route plans assembled from selected houses.
//!
//! Plans live only as long as the request or view that built them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filters::RouteFilters;

/// One stop on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub house_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_arrival: Option<String>,
}

impl RouteStop {
    pub fn new(house_id: impl Into<String>) -> Self {
        Self {
            house_id: house_id.into(),
            planned_arrival: None,
        }
    }
}

/// An ordered visit plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub id: Uuid,
    pub name: String,
    pub filters: RouteFilters,
    pub stops: Vec<RouteStop>,
    pub is_offline_ready: bool,
}
