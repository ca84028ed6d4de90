//! Client map configuration: initial viewport and widget token.

use serde::Serialize;

use crate::config::MapSettings;
use crate::models::House;

pub const DEFAULT_CENTER: (f64, f64) = (32.088, 34.833);
pub const DEFAULT_ZOOM: f64 = 8.0;
pub const FOCUSED_ZOOM: f64 = 10.0;

pub const MISSING_TOKEN_MESSAGE: &str =
    "Interactive map unavailable: set MAPBOX_PUBLIC_TOKEN to enable it.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_CENTER.0,
            longitude: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapViewport {
    /// Centered on the mean position of `houses`, or the region default
    /// when there are none.
    pub fn fit(houses: &[House]) -> Self {
        if houses.is_empty() {
            return Self::default();
        }
        let count = houses.len() as f64;
        let latitude = houses.iter().map(|h| h.latitude).sum::<f64>() / count;
        let longitude = houses.iter().map(|h| h.longitude).sum::<f64>() / count;
        Self {
            latitude,
            longitude,
            zoom: FOCUSED_ZOOM,
        }
    }
}

/// What the browser needs to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub viewport: MapViewport,
}

impl MapViewConfig {
    pub fn build(settings: &MapSettings, houses: &[House]) -> Self {
        let token = settings
            .public_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let viewport = MapViewport::fit(houses);

        match token {
            Some(token) => Self {
                enabled: true,
                access_token: Some(token.to_string()),
                message: None,
                viewport,
            },
            None => Self {
                enabled: false,
                access_token: None,
                message: Some(MISSING_TOKEN_MESSAGE.to_string()),
                viewport,
            },
        }
    }
}
