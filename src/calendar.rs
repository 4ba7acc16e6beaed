//! Month grid projection.
//!
//! A grid is recomputed from scratch on every call: it is at most six rows
//! of seven days and is never cached.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::config::DatePickerConfig;
use crate::consts::DAYS_PER_WEEK;
use crate::prelude::*;
use crate::range::{DateRange, is_date_in_range, is_range_end, is_range_start, is_same_day, normalize_range};
use crate::types::{DayOfWeek, SelectionMode, YearMonth};

/// One cell of the month grid, with everything a renderer needs to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Midnight at the start of the day
    pub date:             NaiveDateTime,
    pub is_today:         bool,
    /// False for padding days borrowed from the neighbouring months
    pub is_current_month: bool,
    pub is_selected:      bool,
    /// Inside the selected range, or the hover preview while a range is half done
    pub is_in_range:      bool,
    pub is_range_start:   bool,
    pub is_range_end:     bool,
    pub is_disabled:      bool,
}

/// Seven consecutive days starting on the configured first day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deref, Serialize)]
pub struct CalendarWeek {
    pub days: Vec<CalendarDay>,
}

/// A month laid out as whole weeks (4 to 6 rows).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarMonth {
    pub year:  i32,
    /// 0-based month (0 = January)
    pub month: u32,
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarMonth {
    /// Every day in the grid, row by row
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }
}

/// The selection a grid is drawn against.
#[derive(Debug, Clone, Copy)]
pub struct GridSelection<'a> {
    /// Decides which of the selection fields `is_selected` reads
    pub mode:           SelectionMode,
    pub selected_date:  Option<&'a NaiveDateTime>,
    pub selected_dates: &'a [NaiveDateTime],
    pub selected_range: &'a DateRange,
    pub hovered_date:   Option<&'a NaiveDateTime>,
}

/// First and last visible day for a month: from the first `first_day_of_week`
/// on or before the 1st to the day before `first_day_of_week` on or after the
/// last day. `None` when the month lies outside chrono's representable years.
pub fn grid_window(month: YearMonth, first_day_of_week: DayOfWeek) -> Option<(NaiveDate, NaiveDate)> {
    let first = month.first_day()?;
    let last = month.last_day()?;

    let lead = first_day_of_week.days_until(DayOfWeek::of(&first));
    let trail = DayOfWeek::of(&last).days_until(first_day_of_week.previous());

    let start = first.checked_sub_signed(TimeDelta::days(i64::from(lead)))?;
    let end = last.checked_add_signed(TimeDelta::days(i64::from(trail)))?;
    Some((start, end))
}

/// Projects one day against the selection and constraints.
///
/// `is_selected` follows the mode: `selected_date` in single mode,
/// `selected_dates` in multiple mode, and either of them in range mode. `is_in_range` previews `start..hovered` (in either order) while
/// the range has a start but no end; the endpoint flags always use the real
/// range.
pub fn create_calendar_day(
    date: NaiveDateTime,
    month: YearMonth,
    selection: &GridSelection<'_>,
    config: &DatePickerConfig,
    today: NaiveDate,
) -> CalendarDay {
    let range = selection.selected_range;
    let matches_single = || selection.selected_date.is_some_and(|selected| is_same_day(&date, selected));
    let matches_multiple = || selection.selected_dates.iter().any(|d| is_same_day(&date, d));
    let is_selected = match selection.mode {
        SelectionMode::Single => matches_single(),
        SelectionMode::Multiple => matches_multiple(),
        SelectionMode::Range => matches_single() || matches_multiple(),
    };

    let is_in_range = match (range.start, range.end, selection.hovered_date) {
        (Some(start), None, Some(hovered)) => is_date_in_range(&date, &normalize_range(start, *hovered)),
        _ => is_date_in_range(&date, range),
    };

    CalendarDay {
        date,
        is_today: date.date() == today,
        is_current_month: month.contains(&date),
        is_selected,
        is_in_range,
        is_range_start: is_range_start(&date, range),
        is_range_end: is_range_end(&date, range),
        is_disabled: config.is_date_disabled(&date),
    }
}

/// Builds the grid for `month`.
///
/// Months outside chrono's representable years produce a grid with no weeks.
pub fn generate_calendar_month(
    month: YearMonth,
    selection: &GridSelection<'_>,
    config: &DatePickerConfig,
    today: NaiveDate,
) -> CalendarMonth {
    let Some((start, end)) = grid_window(month, config.first_day_of_week) else {
        tracing::warn!(%month, "month outside representable range, empty grid");
        return CalendarMonth {
            year:  month.year,
            month: month.month,
            weeks: Vec::new(),
        };
    };

    let days: Vec<CalendarDay> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| create_calendar_day(day.and_time(NaiveTime::MIN), month, selection, config, today))
        .collect();

    let weeks: Vec<CalendarWeek> = days
        .chunks(DAYS_PER_WEEK)
        .map(|chunk| CalendarWeek { days: chunk.to_vec() })
        .collect();

    tracing::trace!(%month, weeks = weeks.len(), "generated calendar grid");

    CalendarMonth {
        year: month.year,
        month: month.month,
        weeks,
    }
}
