/// Number of days in a calendar week row
pub const DAYS_PER_WEEK: usize = 7;

/// Fewest week rows a month grid can span (February starting on the first day of week)
pub const MIN_WEEKS_PER_MONTH: usize = 4;
/// Most week rows a month grid can span
pub const MAX_WEEKS_PER_MONTH: usize = 6;

/// Months in a year
pub const MONTHS_PER_YEAR: u32 = 12;
/// 0-based index of January
pub const JANUARY: u32 = 0;
/// 0-based index of December
pub const DECEMBER: u32 = 11;

/// Highest weekday number (Saturday); Sunday is 0
pub const MAX_DAY_OF_WEEK: u8 = 6;

/// Hours in a day
pub const HOURS_PER_DAY: u32 = 24;
/// Hours shown on a 12-hour clock face
pub const HOURS_PER_HALF_DAY: u32 = 12;
/// Minutes in an hour, also the exclusive upper bound for minute options
pub const MINUTES_PER_HOUR: u32 = 60;
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Largest accepted minute step
pub const MAX_MINUTE_STEP: u8 = 60;

/// Pattern used when no format pattern is supplied
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";
/// Locale used when none is configured (passed through, never interpreted)
pub const DEFAULT_LOCALE: &str = "en-US";

/// Century added to two-digit `yy` years
pub(crate) const TWO_DIGIT_YEAR_BASE: i32 = 2000;

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Length of abbreviated month and weekday names ("Jan", "Mon")
pub(crate) const SHORT_NAME_LEN: usize = 3;

/// Meridiem suffix before noon
pub const AM: &str = "AM";
/// Meridiem suffix from noon on
pub const PM: &str = "PM";
