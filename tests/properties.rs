use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use headless_date_picker::{
    DAYS_PER_WEEK, DatePicker, DatePickerConfig, DayOfWeek, FixedClock, MAX_WEEKS_PER_MONTH, MIN_WEEKS_PER_MONTH,
    SelectionMode, TimeConfig, TimeFormat, YearMonth, generate_calendar_month, normalize_range,
};
use proptest::prelude::*;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Any minute within roughly fifty years of 2000-01-01
fn any_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..18_000, 0i64..1_440).prop_map(|(days, minutes)| epoch() + TimeDelta::days(days) + TimeDelta::minutes(minutes))
}

fn any_mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![
        Just(SelectionMode::Single),
        Just(SelectionMode::Multiple),
        Just(SelectionMode::Range),
    ]
}

fn any_weekday() -> impl Strategy<Value = DayOfWeek> {
    (0u8..7).prop_filter_map("weekday", |n| DayOfWeek::new(n).ok())
}

fn picker(config: DatePickerConfig) -> DatePicker<FixedClock> {
    DatePicker::with_clock(config, FixedClock(epoch()))
}

proptest! {
    #[test]
    fn selecting_a_disabled_date_changes_nothing(
        mode in any_mode(),
        date in any_datetime(),
        open in any::<bool>(),
    ) {
        let config = DatePickerConfig::new(mode).with_disabled_dates([date]);
        let mut p = picker(config);
        p.set_is_open(open);
        let before = p.state().clone();

        p.select_date(date);
        p.add_date(date);
        p.select_date_and_time(date, 12, 0, 0);

        prop_assert_eq!(p.state(), &before);
    }

    #[test]
    fn normalize_range_orders_and_is_idempotent(a in any_datetime(), b in any_datetime()) {
        let range = normalize_range(a, b);
        let (Some(start), Some(end)) = (range.start, range.end) else {
            return Err(TestCaseError::fail("normalized range must be complete"));
        };

        prop_assert!(start.date() <= end.date());
        prop_assert_eq!(normalize_range(start, end), range);
    }

    #[test]
    fn grid_covers_month_in_whole_weeks(
        year in 1900i32..2200,
        month in 0u32..12,
        first_day in any_weekday(),
    ) {
        let config = DatePickerConfig::default().with_first_day_of_week(first_day);
        let viewport = YearMonth { year, month };
        let p = picker(config.clone());
        let calendar = generate_calendar_month(viewport, &p.state().selection(config.mode), &config, epoch().date());

        prop_assert!((MIN_WEEKS_PER_MONTH..=MAX_WEEKS_PER_MONTH).contains(&calendar.weeks.len()));
        prop_assert!(calendar.days().count() <= MAX_WEEKS_PER_MONTH * DAYS_PER_WEEK);
        for week in &calendar.weeks {
            prop_assert_eq!(week.len(), DAYS_PER_WEEK);
            prop_assert_eq!(DayOfWeek::of(&week[0].date), first_day);
        }

        let in_month: Vec<u32> = calendar
            .days()
            .filter(|d| d.is_current_month)
            .map(|d| d.date.day())
            .collect();
        let expected: Vec<u32> = (1..=viewport.last_day().map_or(0, |d| d.day())).collect();
        prop_assert_eq!(in_month, expected);
    }

    #[test]
    fn next_then_previous_month_is_identity(year in 1900i32..2200, month in 0i32..12) {
        let mut p = picker(DatePickerConfig::default());
        p.go_to_month(year, month);
        let start = (p.current_year(), p.current_month());

        p.go_to_next_month();
        p.go_to_previous_month();
        prop_assert_eq!((p.current_year(), p.current_month()), start);
    }

    #[test]
    fn go_to_month_always_lands_on_a_valid_month(year in 1900i32..2200, month in -48i32..48) {
        let mut p = picker(DatePickerConfig::default());
        p.go_to_month(year, month);
        prop_assert!(p.current_month() < 12);
        prop_assert_eq!(
            i64::from(p.current_year()) * 12 + i64::from(p.current_month()),
            i64::from(year) * 12 + i64::from(month),
        );
    }

    #[test]
    fn multiple_mode_select_twice_toggles_back(date in any_datetime(), others in prop::collection::vec(any_datetime(), 0..5)) {
        let others: Vec<_> = others.into_iter().filter(|d| d.date() != date.date()).collect();
        let mut p = picker(DatePickerConfig::new(SelectionMode::Multiple).with_selected_dates(others.clone()));

        p.select_date(date);
        prop_assert!(p.is_date_selected(&date));
        p.select_date(date);
        prop_assert!(!p.is_date_selected(&date));
        prop_assert_eq!(p.selected_dates(), others.as_slice());
    }

    #[test]
    fn any_time_components_leave_a_valid_state(
        date in any_datetime(),
        hours in any::<u32>(),
        minutes in any::<u32>(),
        seconds in any::<u32>(),
    ) {
        let config = DatePickerConfig::default().with_time(TimeConfig::enabled(TimeFormat::TwentyFourHour));
        let mut p = picker(config);
        p.select_date(date);
        p.set_time(hours, minutes, seconds);
        p.select_date_and_time(date, hours, minutes, seconds);

        prop_assert!(p.selected_date().is_some());
    }
}
