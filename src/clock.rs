use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for the picker.
///
/// Highlighting today and `go_to_today` both read the clock; everything else
/// is a pure function of configuration and state. Swap in a [`FixedClock`]
/// to pin the current moment in tests or replays.
pub trait Clock {
    /// Current local wall-clock moment
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
