use crate::config::ConfigError;
use crate::consts::{DECEMBER, JANUARY, MAX_DAY_OF_WEEK, MAX_MINUTE_STEP, MONTHS_PER_YEAR};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;
use std::str::FromStr;

/// A weekday number guaranteed to be in the range `0..=MAX_DAY_OF_WEEK`
/// (0 = Sunday .. 6 = Saturday).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    /// Creates a new DayOfWeek, validating that it's <= `MAX_DAY_OF_WEEK`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDayOfWeek` if the value is > `MAX_DAY_OF_WEEK`.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if value > MAX_DAY_OF_WEEK {
            return Err(ConfigError::InvalidDayOfWeek(value));
        }
        Ok(Self(value))
    }

    /// Returns the weekday number as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Weekday of a date or date-time
    #[allow(clippy::cast_possible_truncation)]
    pub fn of<D: Datelike>(date: &D) -> Self {
        // num_days_from_sunday is always 0..=6
        Self(date.weekday().num_days_from_sunday() as u8)
    }

    /// The weekday immediately before this one, wrapping Sunday to Saturday
    pub const fn previous(self) -> Self {
        Self((self.0 + MAX_DAY_OF_WEEK) % (MAX_DAY_OF_WEEK + 1))
    }

    /// Days to step forward from `self` to reach `other` (0..=6)
    pub const fn days_until(self, other: Self) -> u8 {
        (other.0 + (MAX_DAY_OF_WEEK + 1) - self.0) % (MAX_DAY_OF_WEEK + 1)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

/// Spacing between minute options, guaranteed to be in `1..=MAX_MINUTE_STEP`.
///
/// Steps that do not divide 60 are accepted; they just produce an uneven
/// set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MinuteStep(NonZeroU8);

impl MinuteStep {
    pub const ONE: Self = Self(NonZeroU8::MIN);

    /// Creates a new MinuteStep, validating that it's non-zero and <= `MAX_MINUTE_STEP`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidMinuteStep` if the value is 0 or > `MAX_MINUTE_STEP`.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        let non_zero = NonZeroU8::new(value).ok_or(ConfigError::InvalidMinuteStep(value))?;
        if value > MAX_MINUTE_STEP {
            return Err(ConfigError::InvalidMinuteStep(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the step as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for MinuteStep {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for MinuteStep {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinuteStep> for u8 {
    fn from(step: MinuteStep) -> Self {
        step.0.get()
    }
}

/// How clicks on calendar days turn into a selection. Fixed for the
/// lifetime of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One date; selecting closes the picker
    #[default]
    #[display(fmt = "single")]
    Single,
    /// Any number of dates, toggled on click
    #[display(fmt = "multiple")]
    Multiple,
    /// A start and an end date picked with two clicks
    #[display(fmt = "range")]
    Range,
}

impl FromStr for SelectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            "range" => Ok(Self::Range),
            other => Err(ConfigError::UnknownSelectionMode(other.to_owned())),
        }
    }
}

/// Clock convention for time display and hour options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    #[display(fmt = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    #[display(fmt = "24h")]
    TwentyFourHour,
}

impl FromStr for TimeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "12h" => Ok(Self::TwelveHour),
            "24h" => Ok(Self::TwentyFourHour),
            other => Err(ConfigError::UnknownTimeFormat(other.to_owned())),
        }
    }
}

/// A calendar viewport position: a year and a 0-based month (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}", "year", "month + 1")]
pub struct YearMonth {
    pub year:  i32,
    pub month: u32,
}

/// The months on either side of a viewport position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthBoundaries {
    pub previous: YearMonth,
    pub current:  YearMonth,
    pub next:     YearMonth,
}

impl YearMonth {
    /// Builds a position from any month number, carrying whole years so that
    /// month 12 is January of the next year and month -1 is December of the
    /// previous one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalized(year: i32, month: i32) -> Self {
        let months = MONTHS_PER_YEAR as i32;
        let carry = month.div_euclid(months);
        // rem_euclid is always 0..12
        Self {
            year:  year.saturating_add(carry),
            month: month.rem_euclid(months) as u32,
        }
    }

    /// Month containing the given date
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year:  date.year(),
            month: date.month0(),
        }
    }

    /// The following month, rolling December into January of the next year
    pub const fn next(self) -> Self {
        if self.month >= DECEMBER {
            Self {
                year:  self.year.saturating_add(1),
                month: JANUARY,
            }
        } else {
            Self {
                year:  self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, rolling January into December of the previous year
    pub const fn previous(self) -> Self {
        if self.month == JANUARY {
            Self {
                year:  self.year.saturating_sub(1),
                month: DECEMBER,
            }
        } else {
            Self {
                year:  self.year,
                month: self.month - 1,
            }
        }
    }

    pub const fn boundaries(self) -> MonthBoundaries {
        MonthBoundaries {
            previous: self.previous(),
            current:  self,
            next:     self.next(),
        }
    }

    /// First day of the month, `None` outside chrono's representable years
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Last day of the month, `None` outside chrono's representable years
    pub fn last_day(self) -> Option<NaiveDate> {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month + 1, 1)?.pred_opt()
    }

    /// Whether the date falls inside this month
    pub fn contains<D: Datelike>(self, date: &D) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_day_of_week_new_valid() {
        for value in 0..=6 {
            assert!(DayOfWeek::new(value).is_ok(), "Weekday {value} should be valid");
        }
    }

    #[test]
    fn test_day_of_week_new_invalid() {
        let result = DayOfWeek::new(7);
        assert!(matches!(result, Err(ConfigError::InvalidDayOfWeek(7))));
    }

    #[test]
    fn test_day_of_week_of_date() {
        // 2024-01-07 is a Sunday, 2024-01-13 a Saturday
        assert_eq!(DayOfWeek::of(&date(2024, 1, 7)), DayOfWeek::SUNDAY);
        assert_eq!(DayOfWeek::of(&date(2024, 1, 13)), DayOfWeek::SATURDAY);
        assert_eq!(DayOfWeek::of(&date(2024, 1, 15)), DayOfWeek::MONDAY);
    }

    #[test]
    fn test_day_of_week_previous_wraps() {
        assert_eq!(DayOfWeek::SUNDAY.previous(), DayOfWeek::SATURDAY);
        assert_eq!(DayOfWeek::MONDAY.previous(), DayOfWeek::SUNDAY);
    }

    #[test]
    fn test_day_of_week_days_until() {
        assert_eq!(DayOfWeek::MONDAY.days_until(DayOfWeek::MONDAY), 0);
        assert_eq!(DayOfWeek::MONDAY.days_until(DayOfWeek::SUNDAY), 6);
        assert_eq!(DayOfWeek::SATURDAY.days_until(DayOfWeek::SUNDAY), 1);
    }

    #[test]
    fn test_day_of_week_serde() {
        let day = DayOfWeek::new(3).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "3");

        let parsed: DayOfWeek = serde_json::from_str(&json).unwrap();
        assert_eq!(day, parsed);

        let result: Result<DayOfWeek, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }

    #[test]
    fn test_minute_step_bounds() {
        assert!(matches!(MinuteStep::new(0), Err(ConfigError::InvalidMinuteStep(0))));
        assert!(matches!(MinuteStep::new(61), Err(ConfigError::InvalidMinuteStep(61))));
        assert_eq!(MinuteStep::new(15).unwrap().get(), 15);
        // Non-divisors of 60 are accepted
        assert!(MinuteStep::new(7).is_ok());
        assert_eq!(MinuteStep::default().get(), 1);
    }

    #[test]
    fn test_selection_mode_strings() {
        for mode in [SelectionMode::Single, SelectionMode::Multiple, SelectionMode::Range] {
            assert_eq!(mode.to_string().parse::<SelectionMode>().unwrap(), mode);
        }
        assert!(matches!(
            "week".parse::<SelectionMode>(),
            Err(ConfigError::UnknownSelectionMode(_))
        ));
        assert_eq!(serde_json::to_string(&SelectionMode::Range).unwrap(), r#""range""#);
    }

    #[test]
    fn test_time_format_strings() {
        assert_eq!(TimeFormat::TwelveHour.to_string(), "12h");
        assert_eq!("24h".parse::<TimeFormat>().unwrap(), TimeFormat::TwentyFourHour);
        assert_eq!(TimeFormat::default(), TimeFormat::TwentyFourHour);
        let parsed: TimeFormat = serde_json::from_str(r#""12h""#).unwrap();
        assert_eq!(parsed, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_year_month_navigation_cases() {
        struct TestCase {
            start:       YearMonth,
            next:        YearMonth,
            previous:    YearMonth,
            description: &'static str,
        }

        let cases = [
            TestCase {
                start:       YearMonth { year: 2024, month: 5 },
                next:        YearMonth { year: 2024, month: 6 },
                previous:    YearMonth { year: 2024, month: 4 },
                description: "mid-year",
            },
            TestCase {
                start:       YearMonth { year: 2024, month: 11 },
                next:        YearMonth { year: 2025, month: 0 },
                previous:    YearMonth { year: 2024, month: 10 },
                description: "December rolls forward",
            },
            TestCase {
                start:       YearMonth { year: 2024, month: 0 },
                next:        YearMonth { year: 2024, month: 1 },
                previous:    YearMonth { year: 2023, month: 11 },
                description: "January rolls back",
            },
        ];

        for case in &cases {
            assert_eq!(case.start.next(), case.next, "next: {}", case.description);
            assert_eq!(case.start.previous(), case.previous, "previous: {}", case.description);
            assert_eq!(case.start.next().previous(), case.start, "round trip: {}", case.description);
        }
    }

    #[test]
    fn test_year_month_normalized() {
        assert_eq!(YearMonth::normalized(2024, 12), YearMonth { year: 2025, month: 0 });
        assert_eq!(YearMonth::normalized(2024, -1), YearMonth { year: 2023, month: 11 });
        assert_eq!(YearMonth::normalized(2024, 25), YearMonth { year: 2026, month: 1 });
        assert_eq!(YearMonth::normalized(2024, 3), YearMonth { year: 2024, month: 3 });
    }

    #[test]
    fn test_year_month_days() {
        let feb = YearMonth { year: 2024, month: 1 };
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29));

        let dec = YearMonth { year: 2023, month: 11 };
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert!(dec.contains(&date(2023, 12, 25)));
        assert!(!dec.contains(&date(2024, 12, 25)));
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(YearMonth { year: 2024, month: 0 }.to_string(), "2024-01");
        assert_eq!(YearMonth { year: 987, month: 11 }.to_string(), "0987-12");
    }

    #[test]
    fn test_boundaries() {
        let b = YearMonth { year: 2024, month: 0 }.boundaries();
        assert_eq!(b.previous, YearMonth { year: 2023, month: 11 });
        assert_eq!(b.next, YearMonth { year: 2024, month: 1 });
    }
}
