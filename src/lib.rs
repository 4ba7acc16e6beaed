//! Headless date picker engine.
//!
//! Owns the selection state of a date picker (single date, multiple dates or
//! a range), generates the week-aligned calendar grid the view renders, and
//! formats and parses dates against simple patterns. Nothing here draws
//! anything: the host renders [`CalendarMonth`] however it likes and feeds
//! user input back through [`DatePicker`].
//!
//! ```
//! use headless_date_picker::{DatePicker, DatePickerConfig, FixedClock, SelectionMode};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut picker = DatePicker::with_clock(DatePickerConfig::new(SelectionMode::Range), FixedClock(now));
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! picker.select_date(start);
//! picker.select_date(end);
//!
//! assert_eq!(picker.selected_range().start, Some(end));
//! assert_eq!(picker.selected_range().end, Some(start));
//! ```

mod calendar;
mod clock;
mod config;
mod constraints;
mod consts;
mod format;
mod prelude;
mod range;
mod state;
mod time;
mod types;

#[cfg(test)]
mod test_utils;

pub use calendar::{CalendarDay, CalendarMonth, CalendarWeek, GridSelection, create_calendar_day, generate_calendar_month, grid_window};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DatePickerConfig, TimeConfig};
pub use constraints::is_date_disabled;
pub use consts::*;
pub use format::{
    DatePattern, FormatError, format_date, parse_date, parse_date_with_reference, try_format_date, try_parse_date,
    try_parse_date_with_reference,
};
pub use range::{DateRange, is_date_in_range, is_range_end, is_range_start, is_same_day, normalize_range};
pub use state::DatePickerState;
pub use time::{
    combine_date_and_time, display_hour, format_time, generate_hour_options, generate_minute_options,
    generate_second_options, is_pm, to_24_hour, toggle_meridiem,
};
pub use types::{DayOfWeek, MinuteStep, MonthBoundaries, SelectionMode, TimeFormat, YearMonth};

use chrono::NaiveDateTime;

/// One picker session: a fixed configuration, the current state and a clock.
///
/// Every operation computes the next [`DatePickerState`] from the current one
/// and swaps it in whole, so [`DatePicker::state`] never exposes a half
/// applied update. Operations that do not apply (a disabled date, the wrong
/// mode) leave the state as it was.
#[derive(Debug, Clone)]
pub struct DatePicker<C: Clock = SystemClock> {
    config: DatePickerConfig,
    state:  DatePickerState,
    clock:  C,
}

impl DatePicker {
    /// Session reading the system's local clock
    pub fn new(config: DatePickerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> DatePicker<C> {
    pub fn with_clock(config: DatePickerConfig, clock: C) -> Self {
        let state = DatePickerState::initial(&config, clock.now());
        tracing::debug!(mode = %config.mode, viewport = %state.viewport(), "date picker created");
        Self { config, state, clock }
    }

    pub const fn config(&self) -> &DatePickerConfig {
        &self.config
    }

    pub const fn state(&self) -> &DatePickerState {
        &self.state
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    fn apply(&mut self, next: DatePickerState) {
        if next != self.state {
            tracing::trace!(viewport = %next.viewport(), is_open = next.is_open(), "state replaced");
        }
        self.state = next;
    }

    // --- state accessors ---

    pub const fn current_month(&self) -> u32 {
        self.state.current_month()
    }

    pub const fn current_year(&self) -> i32 {
        self.state.current_year()
    }

    pub const fn selected_date(&self) -> Option<NaiveDateTime> {
        self.state.selected_date()
    }

    pub fn selected_dates(&self) -> &[NaiveDateTime] {
        self.state.selected_dates()
    }

    pub const fn selected_range(&self) -> DateRange {
        self.state.selected_range()
    }

    pub const fn hovered_date(&self) -> Option<NaiveDateTime> {
        self.state.hovered_date()
    }

    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    // --- selection ---

    pub fn select_date(&mut self, date: NaiveDateTime) {
        self.apply(self.state.select_date(&self.config, date));
    }

    pub fn select_range(&mut self, start: NaiveDateTime, end: Option<NaiveDateTime>) {
        self.apply(self.state.select_range(&self.config, start, end));
    }

    pub fn add_date(&mut self, date: NaiveDateTime) {
        self.apply(self.state.add_date(&self.config, date));
    }

    pub fn remove_date(&mut self, date: NaiveDateTime) {
        self.apply(self.state.remove_date(&self.config, date));
    }

    pub fn clear_selection(&mut self) {
        self.apply(self.state.clear_selection());
    }

    pub fn set_hovered_date(&mut self, date: Option<NaiveDateTime>) {
        self.apply(self.state.set_hovered_date(date));
    }

    // --- navigation ---

    pub fn go_to_next_month(&mut self) {
        self.apply(self.state.go_to_next_month());
    }

    pub fn go_to_previous_month(&mut self) {
        self.apply(self.state.go_to_previous_month());
    }

    /// Shows the current month and selects the current moment
    pub fn go_to_today(&mut self) {
        self.apply(self.state.go_to_today(&self.config, self.clock.now()));
    }

    /// `month` is 0-based and may overflow into neighbouring years
    pub fn go_to_month(&mut self, year: i32, month: i32) {
        self.apply(self.state.go_to_month(year, month));
    }

    // --- visibility ---

    pub fn set_is_open(&mut self, is_open: bool) {
        self.apply(self.state.set_is_open(is_open));
    }

    pub fn toggle(&mut self) {
        self.apply(self.state.toggle());
    }

    // --- time ---

    pub fn set_time(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.apply(self.state.set_time(&self.config, hours, minutes, seconds));
    }

    pub fn select_date_and_time(&mut self, date: NaiveDateTime, hours: u32, minutes: u32, seconds: u32) {
        self.apply(
            self.state
                .select_date_and_time(&self.config, date, hours, minutes, seconds),
        );
    }

    // --- queries ---

    /// Grid for the month currently in view, with today taken from the clock
    pub fn calendar(&self) -> CalendarMonth {
        self.state.calendar(&self.config, self.clock.today())
    }

    pub fn is_date_disabled(&self, date: &NaiveDateTime) -> bool {
        self.config.is_date_disabled(date)
    }

    pub fn is_date_selected(&self, date: &NaiveDateTime) -> bool {
        self.state.is_date_selected(&self.config, date)
    }

    pub fn is_date_in_range(&self, date: &NaiveDateTime) -> bool {
        self.state.is_date_in_range(&self.config, date)
    }

    /// Formats with `pattern`, or `yyyy-MM-dd` when none is given. An
    /// unusable pattern yields an empty string.
    pub fn format_date(&self, date: &NaiveDateTime, pattern: Option<&str>) -> String {
        format_date(date, pattern.unwrap_or(DEFAULT_DATE_FORMAT))
    }

    /// Parses with `pattern`, or `yyyy-MM-dd` when none is given. Date
    /// components the pattern leaves out are taken from today's date.
    pub fn parse_date(&self, input: &str, pattern: Option<&str>) -> Option<NaiveDateTime> {
        parse_date_with_reference(input, pattern.unwrap_or(DEFAULT_DATE_FORMAT), self.clock.today())
    }

    /// Hours offered by a time selector under the configured format
    pub fn hour_options(&self) -> Vec<u32> {
        generate_hour_options(self.config.time.time_format)
    }

    /// Minutes offered by a time selector under the configured step
    pub fn minute_options(&self) -> Vec<u32> {
        generate_minute_options(self.config.time.minute_step)
    }

    pub fn second_options(&self) -> Vec<u32> {
        generate_second_options()
    }

    /// Time of the selected date as the configured time selector shows it
    pub fn selected_time(&self) -> Option<String> {
        let time = self.config.time;
        self.state
            .selected_date
            .map(|date| format_time(&date, time.time_format, time.show_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime, range};

    fn now() -> NaiveDateTime {
        datetime(2024, 1, 10, 9, 30, 0)
    }

    fn picker(config: DatePickerConfig) -> DatePicker<FixedClock> {
        DatePicker::with_clock(config, FixedClock(now()))
    }

    #[test]
    fn test_new_starts_closed_on_current_month() {
        let p = picker(DatePickerConfig::default());
        assert_eq!(p.current_month(), 0);
        assert_eq!(p.current_year(), 2024);
        assert!(!p.is_open());
        assert_eq!(p.selected_date(), None);
    }

    #[test]
    fn test_single_select_scenario() {
        let mut p = picker(DatePickerConfig::default());
        p.set_is_open(true);
        p.select_date(date(2024, 1, 15));

        assert_eq!(p.selected_date(), Some(date(2024, 1, 15)));
        assert!(!p.is_open());
        assert!(p.is_date_selected(&date(2024, 1, 15)));
    }

    #[test]
    fn test_range_scenario_with_hover_preview() {
        let mut p = picker(DatePickerConfig::new(SelectionMode::Range));
        p.select_date(date(2024, 1, 20));
        p.set_hovered_date(Some(date(2024, 1, 15)));

        assert!(p.is_date_in_range(&date(2024, 1, 17)));
        let calendar = p.calendar();
        let previewed = calendar
            .days()
            .filter(|d| d.is_in_range)
            .count();
        assert_eq!(previewed, 6);

        p.select_date(date(2024, 1, 15));
        assert_eq!(p.selected_range(), range(date(2024, 1, 15), date(2024, 1, 20)));
    }

    #[test]
    fn test_disabled_weekend_is_ignored() {
        let mut p = picker(
            DatePickerConfig::default().with_disabled_days_of_week([DayOfWeek::SUNDAY, DayOfWeek::SATURDAY]),
        );
        // 2024-01-13 is a Saturday
        assert!(p.is_date_disabled(&date(2024, 1, 13)));
        p.select_date(date(2024, 1, 13));
        assert_eq!(p.selected_date(), None);
    }

    #[test]
    fn test_navigation_and_today() {
        let mut p = picker(DatePickerConfig::default());
        p.go_to_month(2023, 11);
        p.go_to_next_month();
        p.go_to_next_month();
        assert_eq!((p.current_year(), p.current_month()), (2024, 1));

        p.go_to_previous_month();
        assert_eq!((p.current_year(), p.current_month()), (2024, 0));

        p.go_to_month(1999, 5);
        p.go_to_today();
        assert_eq!((p.current_year(), p.current_month()), (2024, 0));
        assert_eq!(p.selected_date(), Some(now()));
    }

    #[test]
    fn test_calendar_marks_today_from_clock() {
        let p = picker(DatePickerConfig::default());
        let today: Vec<_> = p.calendar().days().filter(|d| d.is_today).map(|d| d.date).collect();
        assert_eq!(today, vec![date(2024, 1, 10)]);
    }

    #[test]
    fn test_multiple_mode_add_remove() {
        let mut p = picker(DatePickerConfig::new(SelectionMode::Multiple));
        p.add_date(date(2024, 1, 2));
        p.select_date(date(2024, 1, 3));
        p.remove_date(date(2024, 1, 2));
        assert_eq!(p.selected_dates(), &[date(2024, 1, 3)]);

        p.clear_selection();
        assert!(p.selected_dates().is_empty());
    }

    #[test]
    fn test_time_selection() {
        let config = DatePickerConfig::default()
            .with_time(TimeConfig::enabled(TimeFormat::TwelveHour).with_seconds(true));
        let mut p = picker(config);
        p.toggle();
        p.select_date_and_time(date(2024, 1, 15), 14, 30, 0);
        assert!(!p.is_open());
        assert_eq!(p.selected_time().as_deref(), Some("02:30:00 PM"));

        p.set_time(9, 5, 7);
        assert_eq!(p.selected_date(), Some(datetime(2024, 1, 15, 9, 5, 7)));
        assert_eq!(p.hour_options().first(), Some(&1));
        assert_eq!(p.second_options().len(), 60);
    }

    #[test]
    fn test_minute_options_follow_step() {
        let step = MinuteStep::new(15).unwrap();
        let p = picker(DatePickerConfig::default().with_time(TimeConfig::default().with_minute_step(step)));
        assert_eq!(p.minute_options(), vec![0, 15, 30, 45]);
    }

    #[test]
    fn test_format_and_parse_defaults() {
        let p = picker(DatePickerConfig::default());
        assert_eq!(p.format_date(&date(2024, 1, 15), None), "2024-01-15");
        assert_eq!(p.format_date(&date(2024, 1, 15), Some("dd/MM/yyyy")), "15/01/2024");
        assert_eq!(p.format_date(&date(2024, 1, 15), Some("invalid-format")), "");

        assert_eq!(p.parse_date("2024-01-15", None), Some(date(2024, 1, 15)));
        assert_eq!(p.parse_date("not a date", None), None);
    }

    #[test]
    fn test_parse_fills_missing_fields_from_today() {
        let p = picker(DatePickerConfig::default());
        assert_eq!(p.parse_date("03-15", Some("MM-dd")), Some(date(2024, 3, 15)));
        assert_eq!(p.parse_date("08:45", Some("HH:mm")), Some(datetime(2024, 1, 10, 8, 45, 0)));
    }

    #[test]
    fn test_out_of_range_time_is_ignored() {
        let config = DatePickerConfig::default().with_time(TimeConfig::enabled(TimeFormat::TwentyFourHour));
        let mut p = picker(config);
        p.select_date(date(2024, 1, 15));
        p.set_time(u32::MAX, 0, 0);
        assert_eq!(p.selected_date(), Some(date(2024, 1, 15)));

        p.select_date_and_time(NaiveDateTime::MAX, 24, 0, 0);
        assert_eq!(p.selected_date(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_select_range_only_in_range_mode() {
        let mut single = picker(DatePickerConfig::default());
        single.select_range(date(2024, 1, 1), Some(date(2024, 1, 2)));
        assert!(single.selected_range().is_empty());

        let mut ranged = picker(DatePickerConfig::new(SelectionMode::Range));
        ranged.select_range(date(2024, 1, 5), Some(date(2024, 1, 1)));
        assert_eq!(ranged.selected_range(), range(date(2024, 1, 1), date(2024, 1, 5)));
    }

    #[test]
    fn test_system_clock_picker_builds() {
        let p = DatePicker::new(DatePickerConfig::default());
        assert!(!p.calendar().weeks.is_empty());
    }
}
