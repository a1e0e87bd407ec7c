//! Calendar days in the reference timezone
//!
//! All "today"/"yesterday" decisions go through [`DateKey`], which is a plain
//! calendar date. Yesterday is calendar subtraction, never "24 hours ago".

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date, rendered as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day; `None` for impossible dates
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day
    #[must_use]
    pub fn yesterday(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day
    #[must_use]
    pub fn tomorrow(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Iterate `days` consecutive dates starting at `self`
    pub fn range(self, days: usize) -> impl Iterator<Item = Self> {
        self.0.iter_days().take(days).map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed timezone every client uses to decide what "today" is
///
/// Modelled as a fixed UTC offset, so it has no daylight-saving transitions.
/// Parsed from `UTC`, `Z`, `+HH:MM`, `-HH:MM` or `+HH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTimezone(FixedOffset);

impl ReferenceTimezone {
    #[must_use]
    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    /// Timezone `seconds` east of UTC; `None` outside ±24h
    #[must_use]
    pub fn from_offset_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self)
    }

    #[must_use]
    pub const fn offset(self) -> FixedOffset {
        self.0
    }

    /// Calendar date of `instant` in this timezone
    #[must_use]
    pub fn date_at(self, instant: DateTime<Utc>) -> DateKey {
        DateKey(instant.with_timezone(&self.0).date_naive())
    }

    /// Today's calendar date in this timezone
    #[must_use]
    pub fn today(self) -> DateKey {
        self.date_at(Utc::now())
    }
}

impl Default for ReferenceTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

/// Error for an unrecognized timezone identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized timezone '{0}', expected UTC or an offset like +05:30")]
pub struct TimezoneParseError(String);

impl FromStr for ReferenceTimezone {
    type Err = TimezoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::utc());
        }

        let err = || TimezoneParseError(s.to_string());
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(err()),
        };

        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None => (rest, "0"),
        };
        let hours: i32 = hours.parse().map_err(|_| err())?;
        let minutes: i32 = minutes.parse().map_err(|_| err())?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(err());
        }

        Self::from_offset_seconds(sign * (hours * 3600 + minutes * 60)).ok_or_else(err)
    }
}

impl fmt::Display for ReferenceTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.local_minus_utc() == 0 {
            write!(f, "UTC")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for ReferenceTimezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReferenceTimezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
