//! Builders shared by the unit tests. Months are 1-based here, as written on
//! a calendar.

use chrono::{NaiveDate, NaiveDateTime};

use crate::range::DateRange;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

pub fn date(year: i32, month: u32, d: u32) -> NaiveDateTime {
    datetime(year, month, d, 0, 0, 0)
}

pub fn datetime(year: i32, month: u32, d: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    day(year, month, d)
        .and_hms_opt(hour, minute, second)
        .unwrap_or_else(|| panic!("invalid test time {hour}:{minute}:{second}"))
}

/// A complete range taken as given, without normalization
pub const fn range(start: NaiveDateTime, end: NaiveDateTime) -> DateRange {
    DateRange {
        start: Some(start),
        end:   Some(end),
    }
}
