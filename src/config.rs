use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::consts::{DECEMBER, DEFAULT_LOCALE, MAX_DAY_OF_WEEK, MAX_MINUTE_STEP};
use crate::constraints::is_date_disabled;
use crate::range::DateRange;
use crate::types::{DayOfWeek, MinuteStep, SelectionMode, TimeFormat};

/// Error type for building a picker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Weekday number outside 0-6.
    #[error("Invalid day of week: {0} (must be 0-{max})", max = MAX_DAY_OF_WEEK)]
    InvalidDayOfWeek(u8),

    /// Minute step of zero or above an hour.
    #[error("Invalid minute step: {0} (must be 1-{max})", max = MAX_MINUTE_STEP)]
    InvalidMinuteStep(u8),

    /// 0-based month number above December.
    #[error("Invalid month: {0} (must be 0-{max})", max = DECEMBER)]
    InvalidMonth(u32),

    #[error("Unknown selection mode: {0}")]
    UnknownSelectionMode(String),

    #[error("Unknown time format: {0}")]
    UnknownTimeFormat(String),

    /// Malformed JSON or a field that failed validation.
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Time-of-day options. Only consulted by `set_time` and
/// `select_date_and_time`; the other operations ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeConfig {
    pub enable_time:  bool,
    pub time_format:  TimeFormat,
    pub minute_step:  MinuteStep,
    pub show_seconds: bool,
}

impl TimeConfig {
    /// Time selection switched on, other options at their defaults
    pub fn enabled(time_format: TimeFormat) -> Self {
        Self {
            enable_time: true,
            time_format,
            ..Self::default()
        }
    }

    pub const fn with_minute_step(mut self, minute_step: MinuteStep) -> Self {
        self.minute_step = minute_step;
        self
    }

    pub const fn with_seconds(mut self, show_seconds: bool) -> Self {
        self.show_seconds = show_seconds;
        self
    }
}

/// Per-session picker configuration. Every field is optional when loaded
/// from JSON; `mode` falls back to `single`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatePickerConfig {
    pub mode: SelectionMode,
    pub selected_date: Option<NaiveDateTime>,
    pub selected_dates: Vec<NaiveDateTime>,
    pub selected_range: DateRange,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    pub disabled_dates: Vec<NaiveDateTime>,
    pub disabled_days_of_week: Vec<DayOfWeek>,
    pub first_day_of_week: DayOfWeek,
    /// Carried for the rendering layer; never interpreted here
    pub locale: String,
    pub time: TimeConfig,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            selected_date: None,
            selected_dates: Vec::new(),
            selected_range: DateRange::empty(),
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            disabled_days_of_week: Vec::new(),
            first_day_of_week: DayOfWeek::SUNDAY,
            locale: DEFAULT_LOCALE.to_owned(),
            time: TimeConfig::default(),
        }
    }
}

impl DatePickerConfig {
    /// Default configuration for the given mode
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Loads a configuration from JSON, validating weekday numbers and the
    /// minute step on the way in.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` if the input is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_selected_date(mut self, date: NaiveDateTime) -> Self {
        self.selected_date = Some(date);
        self
    }

    pub fn with_selected_dates(mut self, dates: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.selected_dates = dates.into_iter().collect();
        self
    }

    pub fn with_selected_range(mut self, range: DateRange) -> Self {
        self.selected_range = range;
        self
    }

    pub fn with_min_date(mut self, min_date: NaiveDateTime) -> Self {
        self.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: NaiveDateTime) -> Self {
        self.max_date = Some(max_date);
        self
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.disabled_dates = dates.into_iter().collect();
        self
    }

    pub fn with_disabled_days_of_week(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.disabled_days_of_week = days.into_iter().collect();
        self
    }

    pub fn with_first_day_of_week(mut self, first_day_of_week: DayOfWeek) -> Self {
        self.first_day_of_week = first_day_of_week;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_time(mut self, time: TimeConfig) -> Self {
        self.time = time;
        self
    }

    /// Disabled-date policy applied to this configuration's bounds and exclusions
    pub fn is_date_disabled(&self, date: &NaiveDateTime) -> bool {
        is_date_disabled(
            date,
            self.min_date.as_ref(),
            self.max_date.as_ref(),
            &self.disabled_dates,
            &self.disabled_days_of_week,
        )
    }
}
