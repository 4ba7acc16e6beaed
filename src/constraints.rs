use chrono::NaiveDateTime;

use crate::range::is_same_day;
use crate::types::DayOfWeek;

/// Whether `date` is excluded from selection.
///
/// Checked in order, stopping at the first hit: strictly before `min_date`,
/// strictly after `max_date` (both compared as full timestamps), on the same
/// calendar day as any of `disabled_dates`, or on one of
/// `disabled_days_of_week`.
pub fn is_date_disabled(
    date: &NaiveDateTime,
    min_date: Option<&NaiveDateTime>,
    max_date: Option<&NaiveDateTime>,
    disabled_dates: &[NaiveDateTime],
    disabled_days_of_week: &[DayOfWeek],
) -> bool {
    if min_date.is_some_and(|min| date < min) {
        return true;
    }
    if max_date.is_some_and(|max| date > max) {
        return true;
    }
    if disabled_dates.iter().any(|disabled| is_same_day(date, disabled)) {
        return true;
    }
    disabled_days_of_week.contains(&DayOfWeek::of(date))
}
