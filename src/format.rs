//! Pattern-based date formatting and parsing.
//!
//! Patterns use the familiar letter tokens (`yyyy-MM-dd`, `MMM d, yyyy`,
//! `EEEE HH:mm`). A run of one letter is a single token; text inside single
//! quotes is copied verbatim (`''` is a literal quote); any other
//! non-letter is a literal. Letters outside the table below are rejected.
//!
//! | token             | meaning                                    |
//! |-------------------|--------------------------------------------|
//! | `y` `yy` `yyyy`   | year, two-digit year, zero-padded year     |
//! | `M` `MM`          | month number 1-12                          |
//! | `MMM` `MMMM` `MMMMM` | `Jan`, `January`, `J`                   |
//! | `d` `dd`          | day of month                               |
//! | `E`..`EEE` `EEEE` `EEEEE` | `Mon`, `Monday`, `M`               |
//! | `H` `HH` / `h` `hh` | hour 0-23 / hour 1-12                    |
//! | `m` `mm` / `s` `ss` | minute / second                          |
//! | `a`..`aaa`        | `AM` / `PM`                                |

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::consts::{
    AM, HOURS_PER_DAY, MONTH_NAMES, PM, SHORT_NAME_LEN, TWO_DIGIT_YEAR_BASE,
    WEEKDAY_NAMES,
};
use crate::time::{display_hour, is_pm, to_24_hour};
use crate::types::{DayOfWeek, TimeFormat};

/// Widest numeric field the parser will read for an unpadded year
const MAX_YEAR_DIGITS: usize = 9;
/// Widest numeric field the parser will read for every other unpadded token
const MAX_FIELD_DIGITS: usize = 2;
const QUOTE: char = '\'';

/// Error type for pattern compilation, formatting and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Pattern letter run with no meaning.
    #[error("Unknown format token: {0}")]
    UnknownToken(String),

    #[error("Unterminated quoted literal in pattern")]
    UnterminatedLiteral,

    #[error("Expected {expected:?} at position {position}")]
    ExpectedLiteral { expected: String, position: usize },

    #[error("Expected a number for {token} at position {position}")]
    ExpectedNumber { token: String, position: usize },

    #[error("Unrecognized name for {token} at position {position}")]
    UnknownName { token: String, position: usize },

    #[error("Invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    #[error("Value {value} out of range for {token}")]
    OutOfRange { token: String, value: u32 },

    #[error("Unexpected trailing input at position {0}")]
    TrailingInput(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Weekday,
    Hour24,
    Hour12,
    Minute,
    Second,
    Meridiem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Field { field: Field, width: usize, letter: char },
    Literal(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Field { width, letter, .. } => letter.to_string().repeat(*width),
            Self::Literal(text) => text.clone(),
        }
    }
}

/// A compiled format pattern, reusable for both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    tokens: Vec<Token>,
}

impl FromStr for DatePattern {
    type Err = FormatError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == QUOTE {
                // '' outside a quoted section is an escaped quote
                if chars.next_if_eq(&QUOTE).is_some() {
                    push_literal(&mut tokens, QUOTE);
                    continue;
                }
                let mut closed = false;
                while let Some(q) = chars.next() {
                    if q == QUOTE {
                        if chars.next_if_eq(&QUOTE).is_some() {
                            push_literal(&mut tokens, QUOTE);
                        } else {
                            closed = true;
                            break;
                        }
                    } else {
                        push_literal(&mut tokens, q);
                    }
                }
                if !closed {
                    return Err(FormatError::UnterminatedLiteral);
                }
            } else if c.is_ascii_alphabetic() {
                let mut width = 1;
                while chars.next_if_eq(&c).is_some() {
                    width += 1;
                }
                tokens.push(Token::Field {
                    field: field_for(c, width)?,
                    width,
                    letter: c,
                });
            } else {
                push_literal(&mut tokens, c);
            }
        }

        Ok(Self { tokens })
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}

fn field_for(letter: char, width: usize) -> Result<Field, FormatError> {
    let field = match (letter, width) {
        ('y', 1..=4) => Field::Year,
        ('M', 1..=5) => Field::Month,
        ('d', 1..=2) => Field::Day,
        ('E', 1..=5) => Field::Weekday,
        ('H', 1..=2) => Field::Hour24,
        ('h', 1..=2) => Field::Hour12,
        ('m', 1..=2) => Field::Minute,
        ('s', 1..=2) => Field::Second,
        ('a', 1..=3) => Field::Meridiem,
        _ => return Err(FormatError::UnknownToken(letter.to_string().repeat(width))),
    };
    Ok(field)
}

fn name_for_width(full: &str, width: usize) -> String {
    match width {
        4 => full.to_owned(),
        5 => full.chars().take(1).collect(),
        _ => full.chars().take(SHORT_NAME_LEN).collect(),
    }
}

impl DatePattern {
    /// Renders `date` with this pattern
    pub fn format(&self, date: &NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field { field, width, .. } => out.push_str(&format_field(*field, *width, date)),
            }
        }
        out
    }

    /// Reads a date-time written in this pattern, filling date components
    /// the pattern does not mention from 1970-01-01.
    ///
    /// # Errors
    /// Same as [`DatePattern::parse_with_reference`].
    pub fn parse(&self, input: &str) -> Result<NaiveDateTime, FormatError> {
        self.parse_with_reference(input, NaiveDate::default())
    }

    /// Reads a date-time written in this pattern.
    ///
    /// Date components above the most significant one the pattern carries
    /// come from `reference`; those below it start at their first value. So
    /// `MM-dd` takes the reference year, `yyyy` alone lands on January 1st
    /// and `HH:mm` lands on the reference day. Time components the pattern
    /// leaves out are zero.
    ///
    /// # Errors
    /// Returns a `FormatError` describing the first mismatch, or
    /// `InvalidDate`/`InvalidTime` when the fields do not name a real moment.
    pub fn parse_with_reference(&self, input: &str, reference: NaiveDate) -> Result<NaiveDateTime, FormatError> {
        let mut cursor = Cursor { input, pos: 0 };
        let mut fields = ParsedFields::default();

        for token in &self.tokens {
            match token {
                Token::Literal(text) => cursor.expect_literal(text)?,
                Token::Field { field, width, .. } => {
                    fields.read(*field, *width, token, &mut cursor)?;
                },
            }
        }

        if cursor.pos < input.len() {
            return Err(FormatError::TrailingInput(cursor.pos));
        }
        fields.assemble(reference)
    }
}

fn format_field(field: Field, width: usize, date: &NaiveDateTime) -> String {
    match field {
        Field::Year if width == 2 => format!("{:02}", date.year().rem_euclid(100)),
        Field::Year => format!("{:0width$}", date.year()),
        Field::Month if width <= 2 => format!("{:0width$}", date.month()),
        Field::Month => name_for_width(MONTH_NAMES[date.month0() as usize], width),
        Field::Day => format!("{:0width$}", date.day()),
        Field::Weekday => {
            name_for_width(WEEKDAY_NAMES[usize::from(DayOfWeek::of(date).get())], width)
        },
        Field::Hour24 => format!("{:0width$}", date.hour()),
        Field::Hour12 => format!("{:0width$}", display_hour(date.hour(), TimeFormat::TwelveHour)),
        Field::Minute => format!("{:0width$}", date.minute()),
        Field::Second => format!("{:0width$}", date.second()),
        Field::Meridiem => (if is_pm(date.hour()) { PM } else { AM }).to_owned(),
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos:   usize,
}

impl Cursor<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn expect_literal(&mut self, text: &str) -> Result<(), FormatError> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Ok(())
        } else {
            Err(FormatError::ExpectedLiteral {
                expected: text.to_owned(),
                position: self.pos,
            })
        }
    }

    /// Reads between `min` and `max` ASCII digits, greedily
    fn number(&mut self, min: usize, max: usize, token: &Token) -> Result<u32, FormatError> {
        let digits = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        let err = || FormatError::ExpectedNumber {
            token:    token.describe(),
            position: self.pos,
        };
        if digits < min {
            return Err(err());
        }
        let value = self.rest()[..digits].parse::<u32>().map_err(|_| err())?;
        self.pos += digits;
        Ok(value)
    }

    /// Matches one of `names` (full form first, then abbreviated),
    /// case-insensitively, returning its index
    fn name(&mut self, names: &[&str], token: &Token) -> Result<usize, FormatError> {
        let rest = self.rest();
        let matches = |candidate: &str| {
            rest.get(..candidate.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(candidate))
        };
        let full = names.iter().position(|name| matches(name)).map(|i| (i, names[i].len()));
        let short = || {
            names
                .iter()
                .position(|name| name.get(..SHORT_NAME_LEN).is_some_and(matches))
                .map(|i| (i, SHORT_NAME_LEN))
        };

        match full.or_else(short) {
            Some((index, len)) => {
                self.pos += len;
                Ok(index)
            },
            None => Err(FormatError::UnknownName {
                token:    token.describe(),
                position: self.pos,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct ParsedFields {
    year:   Option<i32>,
    month:  Option<u32>,
    day:    Option<u32>,
    hour24: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    pm:     Option<bool>,
}

impl ParsedFields {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn read(&mut self, field: Field, width: usize, token: &Token, cursor: &mut Cursor<'_>) -> Result<(), FormatError> {
        // Padded tokens read exactly their width, single letters read greedily
        let (min, max) = if width == 1 {
            (1, if field == Field::Year { MAX_YEAR_DIGITS } else { MAX_FIELD_DIGITS })
        } else {
            (width, width)
        };

        match field {
            Field::Year => {
                let value = cursor.number(min, max, token)?;
                // at most MAX_YEAR_DIGITS digits, always fits in i32
                let year = value as i32;
                self.year = Some(if width == 2 { TWO_DIGIT_YEAR_BASE + year } else { year });
            },
            Field::Month if width <= 2 => self.month = Some(cursor.number(min, max, token)?),
            Field::Month => {
                let index = cursor.name(&MONTH_NAMES, token)?;
                // index < 12
                self.month = Some(index as u32 + 1);
            },
            Field::Day => self.day = Some(cursor.number(min, max, token)?),
            Field::Weekday => {
                cursor.name(&WEEKDAY_NAMES, token)?;
            },
            Field::Hour24 => self.hour24 = Some(cursor.number(min, max, token)?),
            Field::Hour12 => {
                let value = cursor.number(min, max, token)?;
                if !(1..=12).contains(&value) {
                    return Err(FormatError::OutOfRange {
                        token: token.describe(),
                        value,
                    });
                }
                self.hour12 = Some(value);
            },
            Field::Minute => self.minute = Some(cursor.number(min, max, token)?),
            Field::Second => self.second = Some(cursor.number(min, max, token)?),
            Field::Meridiem => {
                let index = cursor.name(&[AM, PM], token)?;
                self.pm = Some(index == 1);
            },
        }
        Ok(())
    }

    fn assemble(self, reference: NaiveDate) -> Result<NaiveDateTime, FormatError> {
        let (year, month, day) = match (self.year, self.month, self.day) {
            (Some(year), month, day) => (year, month.unwrap_or(1), day.unwrap_or(1)),
            (None, Some(month), day) => (reference.year(), month, day.unwrap_or(1)),
            (None, None, day) => (reference.year(), reference.month(), day.unwrap_or(reference.day())),
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(FormatError::InvalidDate { year, month, day })?;

        let hour = match (self.hour24, self.hour12) {
            (Some(hour), _) => hour,
            (None, Some(hour)) => to_24_hour(hour, self.pm.unwrap_or(false)),
            (None, None) => 0,
        };
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        if hour >= HOURS_PER_DAY {
            return Err(FormatError::InvalidTime { hour, minute, second });
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or(FormatError::InvalidTime { hour, minute, second })?;

        Ok(date.and_time(time))
    }
}

/// Formats `date` with `pattern`.
///
/// # Errors
/// Returns `FormatError` if the pattern contains an unknown token or an
/// unterminated quote.
pub fn try_format_date(date: &NaiveDateTime, pattern: &str) -> Result<String, FormatError> {
    Ok(pattern.parse::<DatePattern>()?.format(date))
}

/// Formats `date` with `pattern`, or returns an empty string if the pattern
/// is not understood.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    try_format_date(date, pattern).unwrap_or_else(|error| {
        tracing::debug!(%pattern, %error, "date format failed");
        String::new()
    })
}

/// Parses `input` written in `pattern`, with missing date components taken
/// from 1970-01-01.
///
/// # Errors
/// Returns `FormatError` if the pattern is invalid, the input does not match
/// it, or the fields do not form a real calendar date and time.
pub fn try_parse_date(input: &str, pattern: &str) -> Result<NaiveDateTime, FormatError> {
    try_parse_date_with_reference(input, pattern, NaiveDate::default())
}

/// Parses `input` written in `pattern`, with missing date components taken
/// from `reference` (see [`DatePattern::parse_with_reference`]).
///
/// # Errors
/// Same as [`try_parse_date`].
pub fn try_parse_date_with_reference(
    input: &str,
    pattern: &str,
    reference: NaiveDate,
) -> Result<NaiveDateTime, FormatError> {
    pattern.parse::<DatePattern>()?.parse_with_reference(input, reference)
}

/// Parses `input` written in `pattern`, or `None` if it does not match or
/// names an impossible date.
pub fn parse_date(input: &str, pattern: &str) -> Option<NaiveDateTime> {
    parse_date_with_reference(input, pattern, NaiveDate::default())
}

/// [`parse_date`] with missing date components taken from `reference`
pub fn parse_date_with_reference(input: &str, pattern: &str, reference: NaiveDate) -> Option<NaiveDateTime> {
    try_parse_date_with_reference(input, pattern, reference)
        .inspect_err(|error| tracing::debug!(%input, %pattern, %error, "date parse failed"))
        .ok()
}
