//! Filter state container for an interactive directory view.
//!
//! Holds the current [`RouteFilters`] and view mode and exposes the discrete
//! edits a toolbar performs. Toggling appends a missing value or removes a
//! present one, so selection order is kept.

use serde::{Deserialize, Serialize};

use crate::models::{AccessibilityTag, CandyLevel, DietaryTag, RouteFilters, ScareLevel};

/// How the directory is being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Map,
    #[default]
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStore {
    pub view_mode: ViewMode,
    pub filters: RouteFilters,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            filters: Self::default_filters(),
        }
    }
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting filters: 2 km radius, plentiful or low candy, nothing else.
    pub fn default_filters() -> RouteFilters {
        RouteFilters {
            radius_km: Some(2.0),
            candy_levels: vec![CandyLevel::Green, CandyLevel::Yellow],
            ..RouteFilters::default()
        }
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn toggle_scare_level(&mut self, level: ScareLevel) {
        toggle_member(&mut self.filters.scare_levels, level);
    }

    pub fn toggle_candy_level(&mut self, level: CandyLevel) {
        toggle_member(&mut self.filters.candy_levels, level);
    }

    pub fn toggle_accessibility(&mut self, tag: AccessibilityTag) {
        toggle_member(&mut self.filters.accessibility, tag);
    }

    pub fn toggle_dietary(&mut self, tag: DietaryTag) {
        toggle_member(&mut self.filters.dietary, tag);
    }

    pub fn set_radius(&mut self, radius_km: Option<f64>) {
        self.filters.radius_km = radius_km;
    }

    pub fn toggle_open_now(&mut self) {
        self.filters.open_now = !self.filters.open_now;
    }

    pub fn toggle_favorites(&mut self) {
        self.filters.only_favorites = !self.filters.only_favorites;
    }

    /// Restore the starting filters; the view mode is left alone.
    pub fn reset_filters(&mut self) {
        self.filters = Self::default_filters();
    }
}

fn toggle_member<T: PartialEq>(values: &mut Vec<T>, value: T) {
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
}
