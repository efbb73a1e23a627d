//! Domain Value Objects
//!
//! Immutable value types for the tracking domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Stage Index
// ============================================================================

/// Stage index parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageIndexError {
    #[error("Stage index must not be empty")]
    Empty,

    #[error("Stage index must be a decimal number: {0:?}")]
    NotNumeric(String),

    #[error("Stage index must not have leading zeros: {0:?}")]
    LeadingZero(String),

    #[error("Stage index must be positive")]
    Zero,

    #[error("Stage index out of range: {0:?}")]
    OutOfRange(String),
}

/// Caller-supplied stage number (1-based)
///
/// On the wire it is a JSON object key, so it is parsed from text. Only the
/// canonical decimal spelling is accepted: `"3"` but not `"03"`, `"+3"` or
/// `" 3"`, so two distinct keys can never name the same stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageIndex(u32);

impl StageIndex {
    pub fn new(index: u32) -> Result<Self, StageIndexError> {
        if index == 0 {
            return Err(StageIndexError::Zero);
        }
        Ok(Self(index))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for StageIndex {
    type Err = StageIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(StageIndexError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StageIndexError::NotNumeric(s.to_string()));
        }
        if s.len() > 1 && s.starts_with('0') {
            return Err(StageIndexError::LeadingZero(s.to_string()));
        }
        let index = s
            .parse::<u32>()
            .map_err(|_| StageIndexError::OutOfRange(s.to_string()))?;
        Self::new(index)
    }
}

impl fmt::Display for StageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Stage Time
// ============================================================================

/// Ticks (100 ns units) per second
pub const TICKS_PER_SECOND: i64 = 10_000_000;
const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

/// Max digits of the fractional second
const FRACTION_DIGITS: usize = 7;

/// Stage time parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageTimeError {
    #[error("Duration must not be empty")]
    Empty,

    #[error("Malformed duration: {0:?}")]
    Malformed(String),

    #[error("Duration component out of range: {0:?}")]
    ComponentOutOfRange(String),

    #[error("Duration overflows: {0:?}")]
    Overflow(String),
}

/// Signed duration with 100 ns resolution
///
/// Text form is `[-][d.]hh:mm:ss[.fffffff]`:
///
/// | text | meaning |
/// | --- | --- |
/// | `00:01:00` | one minute |
/// | `00:05:23.4560000` | 5 min 23.456 s |
/// | `1.02:00:00` | one day, two hours |
/// | `10675199.02:48:05.4775807` | largest value |
///
/// Parsing accepts one or two digit hour/minute/second fields and one to
/// seven fraction digits. Formatting is canonical: two digit fields, days only
/// when non-zero, the fraction padded to seven digits only when non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StageTime(i64);

impl StageTime {
    pub const ZERO: StageTime = StageTime(0);

    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn ticks(&self) -> i64 {
        self.0
    }
}

impl FromStr for StageTime {
    type Err = StageTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(StageTimeError::Empty);
        }
        let malformed = || StageTimeError::Malformed(s.to_string());
        let out_of_range = || StageTimeError::ComponentOutOfRange(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut fields = body.split(':');
        let (Some(day_hour), Some(minutes), Some(sec_frac), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        let (days, hours) = match day_hour.split_once('.') {
            Some((d, h)) => (parse_digits(d, 1, 8).ok_or_else(malformed)?, h),
            None => (0, day_hour),
        };
        let hours = parse_digits(hours, 1, 2).ok_or_else(malformed)?;
        let minutes = parse_digits(minutes, 1, 2).ok_or_else(malformed)?;

        let (seconds, fraction) = match sec_frac.split_once('.') {
            Some((sec, frac)) => {
                let digits = parse_digits(frac, 1, FRACTION_DIGITS).ok_or_else(malformed)?;
                // "4560" is 0.456 s: right-pad to seven digits
                let scale = 10_i64.pow((FRACTION_DIGITS - frac.len()) as u32);
                (sec, digits * scale)
            }
            None => (sec_frac, 0),
        };
        let seconds = parse_digits(seconds, 1, 2).ok_or_else(malformed)?;

        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(out_of_range());
        }

        let magnitude = i128::from(days) * i128::from(TICKS_PER_DAY)
            + i128::from(hours) * i128::from(TICKS_PER_HOUR)
            + i128::from(minutes) * i128::from(TICKS_PER_MINUTE)
            + i128::from(seconds) * i128::from(TICKS_PER_SECOND)
            + i128::from(fraction);
        let signed = if negative { -magnitude } else { magnitude };

        i64::try_from(signed)
            .map(StageTime)
            .map_err(|_| StageTimeError::Overflow(s.to_string()))
    }
}

/// Parse `min..=max` ASCII digits
fn parse_digits(s: &str, min: usize, max: usize) -> Option<i64> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for StageTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        // unsigned_abs keeps i64::MIN representable
        let magnitude = self.0.unsigned_abs();
        let per_day = TICKS_PER_DAY as u64;
        let per_hour = TICKS_PER_HOUR as u64;
        let per_minute = TICKS_PER_MINUTE as u64;
        let per_second = TICKS_PER_SECOND as u64;

        let days = magnitude / per_day;
        let hours = magnitude % per_day / per_hour;
        let minutes = magnitude % per_hour / per_minute;
        let seconds = magnitude % per_minute / per_second;
        let fraction = magnitude % per_second;

        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if fraction > 0 {
            write!(f, ".{fraction:07}")?;
        }
        Ok(())
    }
}

impl Serialize for StageTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StageTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
