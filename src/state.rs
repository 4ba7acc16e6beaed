//! Picker session state and its transitions.
//!
//! Every transition borrows the current state and returns the next one
//! whole; nothing is mutated in place, so a reader holding a state always
//! sees a consistent snapshot. Disabled dates and mode mismatches leave the
//! state unchanged rather than failing.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarMonth, GridSelection, generate_calendar_month};
use crate::config::{ConfigError, DatePickerConfig};
use crate::consts::DECEMBER;
use crate::range::{DateRange, is_date_in_range, is_same_day, normalize_range};
use crate::time::combine_date_and_time;
use crate::types::{SelectionMode, YearMonth};

/// Mutable half of a picker session: where the calendar is looking and what
/// has been picked so far.
///
/// Fields are read through accessors so the month stays in `0..=11` and a
/// complete range stays ordered. Deserialization checks both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StateSnapshot")]
pub struct DatePickerState {
    /// 0-based month shown in the grid, independent of the selection
    pub(crate) current_month:  u32,
    pub(crate) current_year:   i32,
    pub(crate) selected_date:  Option<NaiveDateTime>,
    /// Insertion order is kept
    pub(crate) selected_dates: Vec<NaiveDateTime>,
    pub(crate) selected_range: DateRange,
    /// Only feeds the range preview
    pub(crate) hovered_date:   Option<NaiveDateTime>,
    pub(crate) is_open:        bool,
}

/// Wire form of [`DatePickerState`], validated on the way in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateSnapshot {
    current_month:  u32,
    current_year:   i32,
    selected_date:  Option<NaiveDateTime>,
    selected_dates: Vec<NaiveDateTime>,
    selected_range: DateRange,
    hovered_date:   Option<NaiveDateTime>,
    is_open:        bool,
}

impl TryFrom<StateSnapshot> for DatePickerState {
    type Error = ConfigError;

    fn try_from(snapshot: StateSnapshot) -> Result<Self, Self::Error> {
        if snapshot.current_month > DECEMBER {
            return Err(ConfigError::InvalidMonth(snapshot.current_month));
        }
        Ok(Self {
            current_month:  snapshot.current_month,
            current_year:   snapshot.current_year,
            selected_date:  snapshot.selected_date,
            selected_dates: snapshot.selected_dates,
            selected_range: snapshot.selected_range.normalized(),
            hovered_date:   snapshot.hovered_date,
            is_open:        snapshot.is_open,
        })
    }
}

impl DatePickerState {
    /// Starting state: the configured selections, the view closed and the
    /// grid on the month containing `now`. A configured range given end
    /// first is reordered.
    pub fn initial(config: &DatePickerConfig, now: NaiveDateTime) -> Self {
        let viewport = YearMonth::of(&now);
        Self {
            current_month:  viewport.month,
            current_year:   viewport.year,
            selected_date:  config.selected_date,
            selected_dates: config.selected_dates.clone(),
            selected_range: config.selected_range.normalized(),
            hovered_date:   None,
            is_open:        false,
        }
    }

    /// 0-based month shown in the grid
    pub const fn current_month(&self) -> u32 {
        self.current_month
    }

    pub const fn current_year(&self) -> i32 {
        self.current_year
    }

    pub const fn selected_date(&self) -> Option<NaiveDateTime> {
        self.selected_date
    }

    pub fn selected_dates(&self) -> &[NaiveDateTime] {
        &self.selected_dates
    }

    pub const fn selected_range(&self) -> DateRange {
        self.selected_range
    }

    pub const fn hovered_date(&self) -> Option<NaiveDateTime> {
        self.hovered_date
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn viewport(&self) -> YearMonth {
        YearMonth {
            year:  self.current_year,
            month: self.current_month,
        }
    }

    fn with_viewport(&self, viewport: YearMonth) -> Self {
        Self {
            current_month: viewport.month,
            current_year: viewport.year,
            ..self.clone()
        }
    }

    fn unchanged(&self, operation: &'static str, reason: &'static str) -> Self {
        tracing::debug!(operation, reason, "selection ignored");
        self.clone()
    }

    /// What the grid should highlight under the given mode
    pub fn selection(&self, mode: SelectionMode) -> GridSelection<'_> {
        GridSelection {
            mode,
            selected_date:  self.selected_date.as_ref(),
            selected_dates: &self.selected_dates,
            selected_range: &self.selected_range,
            hovered_date:   self.hovered_date.as_ref(),
        }
    }

    /// Grid for the current viewport
    pub fn calendar(&self, config: &DatePickerConfig, today: NaiveDate) -> CalendarMonth {
        generate_calendar_month(self.viewport(), &self.selection(config.mode), config, today)
    }

    // --- selection ---

    /// Click on a day.
    ///
    /// Single mode replaces the selection and closes the view. Multiple mode
    /// toggles the day in or out of the list. Range mode starts a new range
    /// when there is no start or the range is already complete, otherwise
    /// completes it (earlier date first) and closes the view.
    pub fn select_date(&self, config: &DatePickerConfig, date: NaiveDateTime) -> Self {
        if config.is_date_disabled(&date) {
            return self.unchanged("select_date", "date is disabled");
        }

        match config.mode {
            SelectionMode::Single => Self {
                selected_date: Some(date),
                is_open: false,
                ..self.clone()
            },
            SelectionMode::Multiple => {
                let already_selected = self.selected_dates.iter().any(|d| is_same_day(d, &date));
                let selected_dates = if already_selected {
                    self.selected_dates
                        .iter()
                        .filter(|d| !is_same_day(d, &date))
                        .copied()
                        .collect()
                } else {
                    let mut dates = self.selected_dates.clone();
                    dates.push(date);
                    dates
                };
                Self {
                    selected_dates,
                    ..self.clone()
                }
            },
            SelectionMode::Range => match self.selected_range {
                DateRange {
                    start: Some(start),
                    end: None,
                } => Self {
                    selected_range: normalize_range(start, date),
                    is_open: false,
                    ..self.clone()
                },
                _ => Self {
                    selected_range: DateRange::starting_at(date),
                    ..self.clone()
                },
            },
        }
    }

    /// Sets the range directly. With no `end` the range is left open. Range
    /// mode only; ignored if either given endpoint is disabled.
    pub fn select_range(&self, config: &DatePickerConfig, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        if config.mode != SelectionMode::Range {
            return self.unchanged("select_range", "not in range mode");
        }
        if config.is_date_disabled(&start) || end.is_some_and(|end| config.is_date_disabled(&end)) {
            return self.unchanged("select_range", "date is disabled");
        }

        let selected_range = match end {
            Some(end) => normalize_range(start, end),
            None => DateRange::starting_at(start),
        };
        Self {
            selected_range,
            ..self.clone()
        }
    }

    /// Appends to the multiple-mode list without the toggle check.
    pub fn add_date(&self, config: &DatePickerConfig, date: NaiveDateTime) -> Self {
        if config.mode != SelectionMode::Multiple {
            return self.unchanged("add_date", "not in multiple mode");
        }
        if config.is_date_disabled(&date) {
            return self.unchanged("add_date", "date is disabled");
        }

        let mut selected_dates = self.selected_dates.clone();
        selected_dates.push(date);
        Self {
            selected_dates,
            ..self.clone()
        }
    }

    /// Drops every multiple-mode entry on the same day as `date`. Not
    /// subject to the disabled-date policy, so a stale selection can always
    /// be removed.
    pub fn remove_date(&self, config: &DatePickerConfig, date: NaiveDateTime) -> Self {
        if config.mode != SelectionMode::Multiple {
            return self.unchanged("remove_date", "not in multiple mode");
        }

        Self {
            selected_dates: self
                .selected_dates
                .iter()
                .filter(|d| !is_same_day(d, &date))
                .copied()
                .collect(),
            ..self.clone()
        }
    }

    /// Forgets every selection, whatever the mode
    pub fn clear_selection(&self) -> Self {
        Self {
            selected_date: None,
            selected_dates: Vec::new(),
            selected_range: DateRange::empty(),
            ..self.clone()
        }
    }

    pub fn set_hovered_date(&self, date: Option<NaiveDateTime>) -> Self {
        Self {
            hovered_date: date,
            ..self.clone()
        }
    }

    // --- navigation ---

    pub fn go_to_next_month(&self) -> Self {
        self.with_viewport(self.viewport().next())
    }

    pub fn go_to_previous_month(&self) -> Self {
        self.with_viewport(self.viewport().previous())
    }

    /// Moves the grid to the month containing `now` and selects `now`:
    /// single mode replaces the date, range mode starts a fresh range, and
    /// multiple mode appends it unless that day is already in the list.
    pub fn go_to_today(&self, config: &DatePickerConfig, now: NaiveDateTime) -> Self {
        let moved = self.with_viewport(YearMonth::of(&now));
        match config.mode {
            SelectionMode::Single => Self {
                selected_date: Some(now),
                ..moved
            },
            SelectionMode::Range => Self {
                selected_range: DateRange::starting_at(now),
                ..moved
            },
            SelectionMode::Multiple => {
                if moved.selected_dates.iter().any(|d| is_same_day(d, &now)) {
                    moved
                } else {
                    let mut selected_dates = moved.selected_dates.clone();
                    selected_dates.push(now);
                    Self {
                        selected_dates,
                        ..moved
                    }
                }
            },
        }
    }

    /// Jumps the grid to an absolute month. Out-of-range months carry into
    /// the year (month 12 is January of `year + 1`).
    pub fn go_to_month(&self, year: i32, month: i32) -> Self {
        self.with_viewport(YearMonth::normalized(year, month))
    }

    // --- visibility ---

    pub fn set_is_open(&self, is_open: bool) -> Self {
        Self {
            is_open,
            ..self.clone()
        }
    }

    pub fn toggle(&self) -> Self {
        self.set_is_open(!self.is_open)
    }

    // --- time ---

    /// Replaces the time-of-day on the selected date. Requires time to be
    /// enabled, single mode, and an existing selection.
    pub fn set_time(&self, config: &DatePickerConfig, hours: u32, minutes: u32, seconds: u32) -> Self {
        if !config.time.enable_time {
            return self.unchanged("set_time", "time selection disabled");
        }
        if config.mode != SelectionMode::Single {
            return self.unchanged("set_time", "not in single mode");
        }
        let Some(selected) = self.selected_date else {
            return self.unchanged("set_time", "no date selected");
        };
        let Some(combined) = combine_date_and_time(selected, hours, minutes, seconds) else {
            return self.unchanged("set_time", "time out of range");
        };

        Self {
            selected_date: Some(combined),
            ..self.clone()
        }
    }

    /// Selects a day and time in one step, closing the view. The time is
    /// dropped when time selection is disabled.
    ///
    /// Only single mode is supported; multiple and range pickers ignore the
    /// call entirely.
    pub fn select_date_and_time(
        &self,
        config: &DatePickerConfig,
        date: NaiveDateTime,
        hours: u32,
        minutes: u32,
        seconds: u32,
    ) -> Self {
        if config.is_date_disabled(&date) {
            return self.unchanged("select_date_and_time", "date is disabled");
        }
        if config.mode != SelectionMode::Single {
            return self.unchanged("select_date_and_time", "not in single mode");
        }

        let selected = if config.time.enable_time {
            match combine_date_and_time(date, hours, minutes, seconds) {
                Some(combined) => combined,
                None => return self.unchanged("select_date_and_time", "time out of range"),
            }
        } else {
            date
        };
        Self {
            selected_date: Some(selected),
            is_open: false,
            ..self.clone()
        }
    }

    // --- queries ---

    /// Whether `date` counts as picked under the configured mode. In range
    /// mode that is the whole complete range, or just the start day while the
    /// range is open.
    pub fn is_date_selected(&self, config: &DatePickerConfig, date: &NaiveDateTime) -> bool {
        match config.mode {
            SelectionMode::Single => self.selected_date.is_some_and(|d| is_same_day(date, &d)),
            SelectionMode::Multiple => self.selected_dates.iter().any(|d| is_same_day(date, d)),
            SelectionMode::Range => {
                if self.selected_range.is_complete() {
                    is_date_in_range(date, &self.selected_range)
                } else {
                    self.selected_range.start.is_some_and(|start| is_same_day(date, &start))
                }
            },
        }
    }

    /// Range-mode membership, including the hover preview while the range is
    /// open. Always false in the other modes.
    pub fn is_date_in_range(&self, config: &DatePickerConfig, date: &NaiveDateTime) -> bool {
        if config.mode != SelectionMode::Range {
            return false;
        }
        match (self.selected_range.start, self.selected_range.end, self.hovered_date) {
            (Some(_), Some(_), _) => is_date_in_range(date, &self.selected_range),
            (Some(start), None, Some(hovered)) => is_date_in_range(date, &normalize_range(start, hovered)),
            _ => false,
        }
    }
}
