//! Daily puzzle scheduling
//!
//! Calendar dates in the reference timezone and the deterministic mapping
//! from a date to that day's secret word.

mod date;
mod selector;
mod source;

pub use date::{DateKey, ReferenceTimezone, TimezoneParseError};
pub use selector::{DailyWordSelector, date_digest};
pub use source::{
    DailyWordSource, FALLBACK_WORD, RemoteDailyWord, ResolvedDailyWord, SourceError,
    resolve_daily_word,
};
