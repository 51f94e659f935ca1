//! Pure scheduling rules for field bookings.
//!
//! Nothing in here touches storage: the store implementations call into
//! [`overlap`] while holding their per-field lock, and the booking service
//! uses [`availability`] and [`transitions`] on rows it has already loaded.

pub mod availability;
pub mod interval;
pub mod overlap;
pub mod transitions;

pub use availability::{booked_segments, free_segments, OperatingWindow, Segment};
pub use interval::{Interval, IntervalError};
pub use overlap::{conflicting_bookings, conflicts};
pub use transitions::{check_transition, Relation, TransitionError};
