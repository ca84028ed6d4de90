//! House filtering.
//!
//! Scare and candy levels accept a house matching ANY selected value.
//! Accessibility and dietary tags require the house to carry EVERY selected
//! tag. An empty selection never constrains.

use chrono::NaiveDateTime;

use crate::models::{House, RouteFilters};

use super::opening_hours::is_house_open_now;

/// Mean Earth radius used for distance filtering.
const EARTH_RADIUS_KM: f64 = 6371.0;

fn matches_scare_level(house: &House, filters: &RouteFilters) -> bool {
    filters.scare_levels.is_empty() || filters.scare_levels.contains(&house.scare_level)
}

fn matches_accessibility(house: &House, filters: &RouteFilters) -> bool {
    filters
        .accessibility
        .iter()
        .all(|tag| house.accessibility.contains(tag))
}

fn matches_dietary(house: &House, filters: &RouteFilters) -> bool {
    filters.dietary.iter().all(|tag| house.dietary.contains(tag))
}

fn matches_candy_level(house: &House, filters: &RouteFilters) -> bool {
    filters.candy_levels.is_empty() || filters.candy_levels.contains(&house.candy_level)
}

/// Whether a single house passes every criterion.
pub fn house_matches(house: &House, filters: &RouteFilters, reference: NaiveDateTime) -> bool {
    if filters.open_now && !is_house_open_now(house, reference) {
        return false;
    }

    matches_scare_level(house, filters)
        && matches_accessibility(house, filters)
        && matches_dietary(house, filters)
        && matches_candy_level(house, filters)
}

/// Houses passing `filters` at `reference`, in input order.
pub fn filter_houses(houses: &[House], filters: &RouteFilters, reference: NaiveDateTime) -> Vec<House> {
    houses
        .iter()
        .filter(|house| house_matches(house, filters, reference))
        .cloned()
        .collect()
}

/// Keep only houses whose id is in `favorites`.
pub fn retain_favorites(houses: &mut Vec<House>, favorites: &[String]) {
    houses.retain(|house| favorites.iter().any(|id| id == &house.id));
}

/// Keep only houses within `radius_km` of `origin` (`(latitude, longitude)`).
pub fn retain_within_radius(houses: &mut Vec<House>, origin: (f64, f64), radius_km: f64) {
    houses.retain(|house| {
        haversine_km(origin, (house.latitude, house.longitude)) <= radius_km
    });
}

/// Great-circle distance between two `(latitude, longitude)` points.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
#[path = "filtering_tests.rs"]
mod filtering_tests;
