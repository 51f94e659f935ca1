use uuid::Uuid;

use super::Interval;
use crate::models::BookingRow;

/// Returns true when `candidate` overlaps any of `existing`.
pub fn conflicts<'a>(candidate: &Interval, existing: impl IntoIterator<Item = &'a Interval>) -> bool {
    existing.into_iter().any(|other| candidate.overlaps(other))
}

/// Ids of the bookings that block `candidate` on `field_id`.
///
/// Canceled bookings and bookings on other fields never block. `exclude` skips
/// one booking so a booking being moved is not compared against itself.
pub fn conflicting_bookings(
    field_id: Uuid,
    candidate: &Interval,
    bookings: &[BookingRow],
    exclude: Option<Uuid>,
) -> Vec<Uuid> {
    bookings
        .iter()
        .filter(|b| b.field_id == field_id)
        .filter(|b| b.status.is_active())
        .filter(|b| Some(b.id) != exclude)
        .filter(|b| candidate.overlaps(&b.interval()))
        .map(|b| b.id)
        .collect()
}
