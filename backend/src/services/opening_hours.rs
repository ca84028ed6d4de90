//! Opening-window evaluation for houses.
//!
//! All instants are venue-local wall-clock times ([`NaiveDateTime`]); slot
//! strings are interpreted on the same clock. Callers holding an absolute
//! instant convert it with [`venue_local`] first.
//!
//! A slot belongs to its listed day. When its end is earlier than its start
//! the window closes on the following calendar day, so an overnight slot is
//! checked both against today's date and against yesterday's.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use serde::Serialize;

use crate::models::{wall_clock, DayIndex, House, HoursSlot};

/// Open/closed summary for presenting a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OpeningStatus {
    /// Inside one of its windows right now.
    Open,
    /// Closed, with the next known opening.
    OpensAt { at: NaiveDateTime },
    /// Closed and no opening within the coming week.
    Closed,
}

/// Whether `house` is open at `reference`.
///
/// Inactive houses are always closed. Window bounds are inclusive.
pub fn is_house_open_now(house: &House, reference: NaiveDateTime) -> bool {
    if !house.is_active() {
        return false;
    }

    let today = DayIndex::from_weekday(reference.weekday());
    let date = reference.date();

    house.hours.iter().any(|slot| {
        if slot.day == today && window_contains(slot, date, reference) {
            return true;
        }

        slot.crosses_midnight()
            && slot.day == today.previous()
            && date
                .pred_opt()
                .is_some_and(|yesterday| window_contains(slot, yesterday, reference))
    })
}

/// Earliest slot start strictly after `reference`, looking at most one
/// week ahead.
///
/// Each slot is projected onto the next date carrying its day index,
/// counting today. A slot listed for today whose start has already passed
/// is not pushed to next week, so it yields nothing.
pub fn next_opening_time(house: &House, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    let today = DayIndex::from_weekday(reference.weekday());

    house
        .hours
        .iter()
        .filter_map(|slot| {
            let offset = u64::try_from(today.days_until(slot.day)).ok()?;
            let date = reference.date().checked_add_days(Days::new(offset))?;
            let start = date.and_time(slot.start);
            (start > reference).then_some(start)
        })
        .min()
}

/// Combined open-now / next-opening view of a house.
pub fn opening_status(house: &House, reference: NaiveDateTime) -> OpeningStatus {
    if is_house_open_now(house, reference) {
        return OpeningStatus::Open;
    }

    match next_opening_time(house, reference) {
        Some(at) => OpeningStatus::OpensAt { at },
        None => OpeningStatus::Closed,
    }
}

/// Concrete `[start, end]` bounds of `slot` when anchored on `date`.
pub fn slot_window(slot: &HoursSlot, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(slot.start);
    let mut end = date.and_time(slot.end);
    if end < start {
        end += TimeDelta::days(1);
    }
    (start, end)
}

fn window_contains(slot: &HoursSlot, date: NaiveDate, reference: NaiveDateTime) -> bool {
    let (start, end) = slot_window(slot, date);
    start <= reference && reference <= end
}

/// "17:00 – 21:30"
pub fn format_time_range(slot: &HoursSlot) -> String {
    format!(
        "{} – {}",
        wall_clock::format(&slot.start),
        wall_clock::format(&slot.end)
    )
}

/// Convert an absolute instant to the venue's wall clock.
pub fn venue_local<Tz: TimeZone>(instant: &DateTime<Tz>, offset: FixedOffset) -> NaiveDateTime {
    instant.with_timezone(&offset).naive_local()
}

#[cfg(test)]
#[path = "opening_hours_tests.rs"]
mod opening_hours_tests;
