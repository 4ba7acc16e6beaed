//! Time-of-day helpers for pickers with `enable_time` switched on.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::consts::{AM, HOURS_PER_DAY, HOURS_PER_HALF_DAY, MINUTES_PER_HOUR, PM, SECONDS_PER_MINUTE};
use crate::types::{MinuteStep, TimeFormat};

/// Same calendar day as `date` at the given time, with sub-second precision
/// cleared. Components past their usual range roll over the way a wall clock
/// would: hour 25 is 01:00 on the following day.
///
/// `None` when the rolled-over moment falls outside chrono's representable
/// range.
pub fn combine_date_and_time(date: NaiveDateTime, hours: u32, minutes: u32, seconds: u32) -> Option<NaiveDateTime> {
    date.date()
        .and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::hours(i64::from(hours)))?
        .checked_add_signed(TimeDelta::minutes(i64::from(minutes)))?
        .checked_add_signed(TimeDelta::seconds(i64::from(seconds)))
}

/// Whether a 24-hour clock hour falls in the afternoon half of the day
#[inline]
pub const fn is_pm(hour: u32) -> bool {
    hour >= HOURS_PER_HALF_DAY
}

/// Hour as shown on the given clock face: 0..=23 for 24h, 1..=12 for 12h
pub const fn display_hour(hour: u32, format: TimeFormat) -> u32 {
    match format {
        TimeFormat::TwentyFourHour => hour,
        TimeFormat::TwelveHour => match hour {
            0 => HOURS_PER_HALF_DAY,
            h if h > HOURS_PER_HALF_DAY => h - HOURS_PER_HALF_DAY,
            h => h,
        },
    }
}

/// Converts a 12-hour clock reading back to 0..=23
pub const fn to_24_hour(display_hour: u32, pm: bool) -> u32 {
    let hour = display_hour % HOURS_PER_HALF_DAY;
    if pm { hour + HOURS_PER_HALF_DAY } else { hour }
}

/// Same clock reading in the other half of the day
pub const fn toggle_meridiem(hour: u32) -> u32 {
    (hour + HOURS_PER_HALF_DAY) % HOURS_PER_DAY
}

/// `HH:MM[:SS]` for 24h, `hh:MM[:SS] AM|PM` for 12h; every field zero-padded.
pub fn format_time(date: &NaiveDateTime, format: TimeFormat, show_seconds: bool) -> String {
    let hour = display_hour(date.hour(), format);
    let mut out = format!("{hour:02}:{:02}", date.minute());
    if show_seconds {
        out.push_str(&format!(":{:02}", date.second()));
    }
    if format == TimeFormat::TwelveHour {
        out.push(' ');
        out.push_str(if is_pm(date.hour()) { PM } else { AM });
    }
    out
}

/// Hours offered by an hour selector
pub fn generate_hour_options(format: TimeFormat) -> Vec<u32> {
    match format {
        TimeFormat::TwelveHour => (1..=HOURS_PER_HALF_DAY).collect(),
        TimeFormat::TwentyFourHour => (0..HOURS_PER_DAY).collect(),
    }
}

/// `0, step, 2*step, ...` below 60. A step that does not divide 60 leaves an
/// uneven final gap; pass a divisor for a canonical set.
pub fn generate_minute_options(step: MinuteStep) -> Vec<u32> {
    (0..MINUTES_PER_HOUR).step_by(usize::from(step.get())).collect()
}

/// Seconds offered by a second selector
pub fn generate_second_options() -> Vec<u32> {
    (0..SECONDS_PER_MINUTE).collect()
}
