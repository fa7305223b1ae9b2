//! Inclusive time windows and the predicate that applies them.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can be placed on the UTC timeline.
pub trait Timestamp {
    fn instant(&self) -> DateTime<Utc>;
}

impl Timestamp for DateTime<Utc> {
    fn instant(&self) -> DateTime<Utc> {
        *self
    }
}

/// A calendar date is placed at its UTC midnight.
impl Timestamp for NaiveDate {
    fn instant(&self) -> DateTime<Utc> {
        start_of_day(*self)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last representable instant of `date`.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date)
        .checked_add_signed(Duration::days(1) - Duration::nanoseconds(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// An inclusive `[start, end]` window. A window with `start > end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whole calendar days: from the first instant of `first` to the last
    /// instant of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// True when no instant can satisfy the window.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains<T: Timestamp + ?Sized>(&self, value: &T) -> bool {
        let instant = value.instant();
        self.start <= instant && instant <= self.end
    }
}

/// `true` when `value` lies in `range`, or when there is no range at all.
pub fn in_range<T: Timestamp + ?Sized>(value: &T, range: Option<&TimeRange>) -> bool {
    match range {
        None => true,
        Some(range) => range.contains(value),
    }
}

/// Like [`in_range`] for values that may be missing. An undated value only
/// matches when there is no range.
pub fn in_range_opt<T: Timestamp>(value: Option<&T>, range: Option<&TimeRange>) -> bool {
    match (value, range) {
        (_, None) => true,
        (Some(value), Some(range)) => range.contains(value),
        (None, Some(_)) => false,
    }
}
