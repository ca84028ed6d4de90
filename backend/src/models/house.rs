//! Participating house records and the attribute vocabularies they use.
//!
//! Houses are read-only reference data. Every enumeration here serializes to
//! the lowercase labels used by the JSON seed and the HTTP API.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::define_label_enum;

define_label_enum!(
    /// Lifecycle status of a listing. Only active houses can ever be open.
    HouseStatus {
        Active => "active",
        Paused => "paused",
        Suspended => "suspended",
    }
);

define_label_enum!(
    /// Self-declared intensity of the experience.
    ScareLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

define_label_enum!(
    /// Coarse candy stock indicator: plentiful, running low, depleted.
    CandyLevel {
        Green => "green",
        Yellow => "yellow",
        Red => "red",
    }
);

define_label_enum!(
    AccessibilityTag {
        Wheelchair => "wheelchair",
        Stroller => "stroller",
        Visual => "visual",
        Hearing => "hearing",
        LowSensory => "low-sensory",
    }
);

define_label_enum!(
    DietaryTag {
        GlutenFree => "gluten-free",
        NutFree => "nut-free",
        Vegan => "vegan",
        Kosher => "kosher",
        SugarFree => "sugar-free",
    }
);

/// Day of the week in the listing convention: Saturday = 0 through Friday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayIndex(u8);

impl DayIndex {
    /// Create a day index, rejecting values outside `0..=6`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 6).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Rotate a calendar weekday into the Saturday-based cycle.
    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(((weekday.num_days_from_sunday() + 1) % 7) as u8)
    }

    pub fn to_weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Sat,
            1 => Weekday::Sun,
            2 => Weekday::Mon,
            3 => Weekday::Tue,
            4 => Weekday::Wed,
            5 => Weekday::Thu,
            _ => Weekday::Fri,
        }
    }

    /// The day before this one, wrapping Saturday back to Friday.
    pub fn previous(self) -> Self {
        Self((self.0 + 6) % 7)
    }

    /// Days to advance from `self` to reach `target`, in `0..=6`.
    pub fn days_until(self, target: DayIndex) -> i64 {
        (i64::from(target.0) - i64::from(self.0) + 7) % 7
    }
}

impl TryFrom<u8> for DayIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Day index {} is outside 0..=6", value))
    }
}

impl From<DayIndex> for u8 {
    fn from(day: DayIndex) -> Self {
        day.0
    }
}

/// One recurring weekly opening window.
///
/// `end` earlier than `start` means the window runs past midnight into the
/// following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSlot {
    pub day: DayIndex,
    #[serde(with = "wall_clock")]
    pub start: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveTime,
}

impl HoursSlot {
    /// Build a slot from "HH:MM" strings.
    pub fn parse(day: u8, start: &str, end: &str) -> Result<Self, String> {
        Ok(Self {
            day: DayIndex::try_from(day)?,
            start: wall_clock::parse(start)?,
            end: wall_clock::parse(end)?,
        })
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }
}

/// A participating address in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: HouseStatus,
    pub scare_level: ScareLevel,
    #[serde(default)]
    pub accessibility: Vec<AccessibilityTag>,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
    pub candy_level: CandyLevel,
    #[serde(default)]
    pub default_image: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hours: Vec<HoursSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_instructions: Option<String>,
    #[serde(default)]
    pub allow_knock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_notes: Option<String>,
    #[serde(default)]
    pub decoration_votes: u32,
    #[serde(default)]
    pub check_ins: u32,
    pub last_updated: DateTime<Utc>,
}

impl House {
    pub fn is_active(&self) -> bool {
        self.status == HouseStatus::Active
    }

    /// Check record-level invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("House id must not be empty".to_string());
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "House {} has latitude {} outside [-90, 90]",
                self.id, self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "House {} has longitude {} outside [-180, 180]",
                self.id, self.longitude
            ));
        }
        Ok(())
    }

    /// Image to show on a card, falling back to the shared placeholder.
    pub fn display_image(&self) -> &str {
        match &self.image_url {
            Some(url) if !self.default_image => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

pub const PLACEHOLDER_IMAGE: &str = "/haunted-house-placeholder.svg";

/// Serde adapter for "HH:MM" wall-clock strings.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(value: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(value.trim(), FORMAT)
            .map_err(|e| format!("Invalid wall-clock time '{}': {}", value, e))
    }

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
