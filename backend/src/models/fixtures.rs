//! Test fixtures shared by unit tests across modules.

use chrono::{TimeZone, Utc};

use super::{
    AccessibilityTag, CandyLevel, DietaryTag, House, HouseStatus, HoursSlot, ScareLevel,
};

/// An active, medium-scare, green-candy house with no hours and no tags.
pub fn house(id: &str) -> House {
    House {
        id: id.to_string(),
        title: format!("House {}", id),
        description: String::new(),
        address: "1 Elm Street".to_string(),
        city: "Haifa".to_string(),
        latitude: 32.79,
        longitude: 34.98,
        status: HouseStatus::Active,
        scare_level: ScareLevel::Medium,
        accessibility: vec![],
        dietary: vec![],
        candy_level: CandyLevel::Green,
        default_image: true,
        image_url: None,
        hours: vec![],
        contact_instructions: None,
        allow_knock: true,
        route_notes: None,
        decoration_votes: 0,
        check_ins: 0,
        last_updated: Utc.with_ymd_and_hms(2025, 10, 30, 12, 0, 0).unwrap(),
    }
}

pub fn slot(day: u8, start: &str, end: &str) -> HoursSlot {
    HoursSlot::parse(day, start, end).unwrap()
}

pub fn with_status(mut house: House, status: HouseStatus) -> House {
    house.status = status;
    house
}

pub fn with_hours(mut house: House, hours: Vec<HoursSlot>) -> House {
    house.hours = hours;
    house
}

pub fn with_scare(mut house: House, level: ScareLevel) -> House {
    house.scare_level = level;
    house
}

pub fn with_candy(mut house: House, level: CandyLevel) -> House {
    house.candy_level = level;
    house
}

pub fn with_accessibility(mut house: House, tags: &[AccessibilityTag]) -> House {
    house.accessibility = tags.to_vec();
    house
}

pub fn with_dietary(mut house: House, tags: &[DietaryTag]) -> House {
    house.dietary = tags.to_vec();
    house
}

pub fn at_location(mut house: House, latitude: f64, longitude: f64) -> House {
    house.latitude = latitude;
    house.longitude = longitude;
    house
}
