//! Deep links into third-party navigation apps.

use serde::Serialize;

use crate::models::House;

/// Navigation links for one house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLinks {
    pub waze: String,
    pub google_maps: String,
}

impl NavigationLinks {
    pub fn for_house(house: &House) -> Self {
        Self {
            waze: waze_link(house.latitude, house.longitude),
            google_maps: google_maps_link(house.latitude, house.longitude),
        }
    }
}

pub fn waze_link(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.waze.com/ul?ll={}%2C{}&navigate=yes",
        latitude, longitude
    )
}

pub fn google_maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://maps.google.com/?q={},{}", latitude, longitude)
}
