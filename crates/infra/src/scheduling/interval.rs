use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("booked_until must be after booking_date")]
    EndNotAfterStart,
}

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Strict half-open test: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, 21)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert_eq!(
            Interval::new(at(9, 0), at(9, 0)),
            Err(IntervalError::EndNotAfterStart)
        );
        assert_eq!(
            Interval::new(at(10, 0), at(9, 0)),
            Err(IntervalError::EndNotAfterStart)
        );
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let first = Interval::new(at(9, 0), at(10, 0)).unwrap();
        let second = Interval::new(at(10, 0), at(11, 0)).unwrap();
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn partial_and_nested_overlaps_are_detected() {
        let base = Interval::new(at(9, 0), at(10, 0)).unwrap();
        let partial = Interval::new(at(8, 30), at(9, 30)).unwrap();
        let nested = Interval::new(at(9, 15), at(9, 45)).unwrap();
        let covering = Interval::new(at(8, 0), at(11, 0)).unwrap();

        for other in [partial, nested, covering] {
            assert!(base.overlaps(&other));
            assert!(other.overlaps(&base));
        }
    }

    #[test]
    fn duration_is_end_minus_start() {
        let i = Interval::new(at(9, 0), at(10, 30)).unwrap();
        assert_eq!(i.duration().num_minutes(), 90);
    }
}
