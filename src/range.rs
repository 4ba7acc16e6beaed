use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Marker printed for a missing range endpoint (ISO 8601 open interval)
const OPEN_ENDPOINT: &str = "..";

/// A possibly incomplete selection range. When both endpoints are present,
/// `start` is not after `end`; writers go through [`normalize_range`] to keep
/// it that way, readers never re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{}/{}", "endpoint(*start)", "endpoint(*end)")]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end:   Option<NaiveDateTime>,
}

impl DateRange {
    /// A range with neither endpoint set
    pub const fn empty() -> Self {
        Self { start: None, end: None }
    }

    /// A range that has a start but is still waiting for its end
    pub const fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end:   None,
        }
    }

    /// Both endpoints present
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Neither endpoint present
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive calendar-day membership; always false for an incomplete range
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        is_date_in_range(date, self)
    }

    /// The same range with a complete pair put in order; incomplete ranges
    /// are returned as they are
    pub fn normalized(self) -> Self {
        match (self.start, self.end) {
            (Some(start), Some(end)) => normalize_range(start, end),
            _ => self,
        }
    }
}

fn endpoint(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| OPEN_ENDPOINT.to_owned(), |date| date.to_string())
}

/// Same year, month and day, ignoring time-of-day
#[inline]
pub fn is_same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// True iff both endpoints are set and `start <= date <= end` by calendar day.
pub fn is_date_in_range(date: &NaiveDateTime, range: &DateRange) -> bool {
    match (range.start, range.end) {
        (Some(start), Some(end)) => {
            let day = date.date();
            start.date() <= day && day <= end.date()
        },
        _ => false,
    }
}

/// Whether `date` falls on the range's start day
pub fn is_range_start(date: &NaiveDateTime, range: &DateRange) -> bool {
    range.start.is_some_and(|start| is_same_day(date, &start))
}

/// Whether `date` falls on the range's end day
pub fn is_range_end(date: &NaiveDateTime, range: &DateRange) -> bool {
    range.end.is_some_and(|end| is_same_day(date, &end))
}

/// Orders two dates into a complete range, earlier first.
///
/// Two dates on the same calendar day keep the order they were given in.
pub fn normalize_range(a: NaiveDateTime, b: NaiveDateTime) -> DateRange {
    if a < b || is_same_day(&a, &b) {
        DateRange {
            start: Some(a),
            end:   Some(b),
        }
    } else {
        DateRange {
            start: Some(b),
            end:   Some(a),
        }
    }
}
