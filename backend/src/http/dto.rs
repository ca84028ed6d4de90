//! Data Transfer Objects for the HTTP API.
//!
//! House records and plans serialize directly; the types here add the
//! per-request views (open state, labels, links) and query parsing.

use std::str::FromStr;

use chrono::{FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{House, RouteFilters, RoutePlan};
use crate::services::{
    format_time_range, next_opening_time, opening_status, venue_local, NavigationLinks,
    OpeningStatus,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub repository: String,
}

// =============================================================================
// Houses
// =============================================================================

/// Query parameters for the house directory.
///
/// List parameters are comma-separated labels, e.g. `scare=low,medium`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseListQuery {
    #[serde(default)]
    pub scare: Option<String>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub candy: Option<String>,
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub favorites_only: Option<bool>,
    #[serde(default)]
    pub favorites: Option<String>,
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub at: Option<String>,
}

impl HouseListQuery {
    /// Criteria described by the query.
    pub fn filters(&self) -> Result<RouteFilters, String> {
        Ok(RouteFilters {
            radius_km: self.radius_km,
            scare_levels: parse_labels(self.scare.as_deref())?,
            accessibility: parse_labels(self.accessibility.as_deref())?,
            dietary: parse_labels(self.dietary.as_deref())?,
            candy_levels: parse_labels(self.candy.as_deref())?,
            open_now: self.open_now.unwrap_or(false),
            only_favorites: self.favorites_only.unwrap_or(false),
        })
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        split_list(self.favorites.as_deref())
            .map(str::to_string)
            .collect()
    }

    /// Search origin for radius filtering.
    pub fn origin(&self) -> Result<Option<(f64, f64)>, String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some((lat, lng))),
            (None, None) => Ok(None),
            _ => Err("lat and lng must be given together".to_string()),
        }
    }
}

/// Query carrying only the reference time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceQuery {
    #[serde(default)]
    pub at: Option<String>,
}

/// Venue-local reference time: `at` when given, otherwise now.
pub fn reference_time(at: Option<&str>, offset: FixedOffset) -> Result<NaiveDateTime, String> {
    match at.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map_err(|_| format!("Invalid 'at' value '{}', expected YYYY-MM-DDTHH:MM", raw)),
        None => Ok(venue_local(&Utc::now(), offset)),
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_labels<T>(raw: Option<&str>) -> Result<Vec<T>, String>
where
    T: FromStr<Err = String> + PartialEq,
{
    let mut values = Vec::new();
    for label in split_list(raw) {
        let value = label.parse::<T>()?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}

/// A house as presented at a given reference time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSummary {
    #[serde(flatten)]
    pub house: House,
    pub open_now: bool,
    pub next_opening: Option<NaiveDateTime>,
    pub opening: OpeningStatus,
    pub hours_labels: Vec<String>,
    pub display_image: String,
    pub navigation: NavigationLinks,
}

impl HouseSummary {
    pub fn at(house: House, reference: NaiveDateTime) -> Self {
        let hours_labels = house
            .hours
            .iter()
            .map(|slot| format!("{} {}", slot.day.to_weekday(), format_time_range(slot)))
            .collect();

        let opening = opening_status(&house, reference);

        Self {
            open_now: opening == OpeningStatus::Open,
            next_opening: next_opening_time(&house, reference),
            opening,
            hours_labels,
            display_image: house.display_image().to_string(),
            navigation: NavigationLinks::for_house(&house),
            house,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseListResponse {
    pub houses: Vec<HouseSummary>,
    pub total: usize,
    pub reference: NaiveDateTime,
}

// =============================================================================
// Routes
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreviewRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub house_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreviewResponse {
    pub plan: RoutePlan,
    pub stops: Vec<HouseSummary>,
    /// Requested ids with no matching house.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessibilityTag, CandyLevel, ScareLevel};

    #[test]
    fn test_query_to_filters() {
        let query = HouseListQuery {
            scare: Some("low, HIGH,low".to_string()),
            accessibility: Some("wheelchair".to_string()),
            candy: Some("green,yellow".to_string()),
            open_now: Some(true),
            ..Default::default()
        };
        let filters = query.filters().unwrap();
        assert_eq!(filters.scare_levels, vec![ScareLevel::Low, ScareLevel::High]);
        assert_eq!(filters.accessibility, vec![AccessibilityTag::Wheelchair]);
        assert_eq!(filters.candy_levels, vec![CandyLevel::Green, CandyLevel::Yellow]);
        assert!(filters.dietary.is_empty());
        assert!(filters.open_now);
        assert!(!filters.only_favorites);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let query = HouseListQuery {
            dietary: Some("vegan,paleo".to_string()),
            ..Default::default()
        };
        assert!(query.filters().unwrap_err().contains("paleo"));
    }

    #[test]
    fn test_origin_requires_both_coordinates() {
        let mut query = HouseListQuery {
            lat: Some(32.0),
            ..Default::default()
        };
        assert!(query.origin().is_err());
        query.lng = Some(34.0);
        assert_eq!(query.origin().unwrap(), Some((32.0, 34.0)));
    }

    #[test]
    fn test_reference_time_formats() {
        let offset = FixedOffset::east_opt(7200).unwrap();
        let with_seconds = reference_time(Some("2025-10-31T19:30:15"), offset).unwrap();
        let without = reference_time(Some("2025-10-31T19:30"), offset).unwrap();
        assert_eq!(with_seconds.to_string(), "2025-10-31 19:30:15");
        assert_eq!(without.to_string(), "2025-10-31 19:30:00");
        assert!(reference_time(Some("31/10/2025"), offset).is_err());
        assert!(reference_time(None, offset).is_ok());
    }

    #[test]
    fn test_summary_labels() {
        use crate::models::fixtures::{house, slot, with_hours};
        let h = with_hours(house("a"), vec![slot(5, "17:00", "21:30")]);
        let reference = NaiveDateTime::parse_from_str("2025-10-30T16:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let summary = HouseSummary::at(h, reference);
        assert_eq!(summary.hours_labels, vec!["Thu 17:00 – 21:30"]);
        assert!(!summary.open_now);
        assert_eq!(
            summary.next_opening.unwrap().to_string(),
            "2025-10-30 17:00:00"
        );
        assert_eq!(
            summary.opening,
            OpeningStatus::OpensAt {
                at: summary.next_opening.unwrap()
            }
        );
    }

    #[test]
    fn test_summary_opening_state() {
        use crate::models::fixtures::{house, slot, with_hours};
        let h = with_hours(house("a"), vec![slot(5, "17:00", "21:30")]);
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();

        let open = HouseSummary::at(h.clone(), at("2025-10-30T18:00"));
        assert!(open.open_now);
        assert_eq!(open.opening, OpeningStatus::Open);

        // Thursday's slot has passed and is not rolled over to next week.
        let closed = HouseSummary::at(h, at("2025-10-30T22:00"));
        assert!(!closed.open_now);
        assert_eq!(closed.opening, OpeningStatus::Closed);
    }
}
