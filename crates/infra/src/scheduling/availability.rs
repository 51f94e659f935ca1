use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Interval;
use crate::models::BookingRow;

/// Daily opening hours of a field, `[opens, closes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl OperatingWindow {
    fn bounds_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.opens), date.and_time(self.closes))
    }

    /// True when `interval` sits on a single day inside the window.
    pub fn contains(&self, interval: &Interval) -> bool {
        interval.start.date() == interval.end.date()
            && interval.start.time() >= self.opens
            && interval.end.time() <= self.closes
    }
}

/// A time-of-day range on the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

/// Non-canceled bookings touching `date`, sorted by start and clipped to the window.
fn occupied_on(window: OperatingWindow, date: NaiveDate, bookings: &[BookingRow]) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let (opens_at, closes_at) = window.bounds_on(date);
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = date
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));

    let mut occupied: Vec<_> = bookings
        .iter()
        .filter(|b| b.status.is_active())
        .filter(|b| b.booking_date < day_end && b.booked_until > day_start)
        .map(|b| (b.booking_date.max(opens_at), b.booked_until.min(closes_at)))
        .filter(|(start, end)| start < end)
        .collect();

    occupied.sort_by_key(|(start, _)| *start);
    occupied
}

pub fn booked_segments(window: OperatingWindow, date: NaiveDate, bookings: &[BookingRow]) -> Vec<Segment> {
    occupied_on(window, date, bookings)
        .into_iter()
        .map(|(start, end)| Segment {
            from: start.time(),
            to: end.time(),
        })
        .collect()
}

pub fn free_segments(window: OperatingWindow, date: NaiveDate, bookings: &[BookingRow]) -> Vec<Segment> {
    let (opens_at, closes_at) = window.bounds_on(date);
    let mut free = Vec::new();
    let mut cursor = opens_at;

    for (start, end) in occupied_on(window, date, bookings) {
        if start > cursor {
            free.push(Segment {
                from: cursor.time(),
                to: start.time(),
            });
        }
        cursor = cursor.max(end);
    }

    if cursor < closes_at {
        free.push(Segment {
            from: cursor.time(),
            to: closes_at.time(),
        });
    }

    free
}
