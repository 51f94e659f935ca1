use thiserror::Error;

use crate::models::BookingStatus;

/// How the caller relates to a booking. A caller can be both at once when an
/// owner books their own field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Relation {
    pub owns_field: bool,
    pub made_booking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("only the field owner or the booking's user may change this booking")]
    NotAParty,

    #[error("not allowed to move a booking from {from} to {to}")]
    ActorNotAllowed {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("cannot move a booking from {from} to {to}")]
    Invalid {
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl TransitionError {
    /// Authorization failures, as opposed to state-machine violations.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            TransitionError::NotAParty | TransitionError::ActorNotAllowed { .. }
        )
    }
}

/// Validate a status change against the booking lifecycle:
///
/// | from      | to        | who                       |
/// |-----------|-----------|---------------------------|
/// | pending   | confirmed | field owner               |
/// | pending   | canceled  | field owner, booking user |
/// | confirmed | canceled  | field owner               |
///
/// Everything else, including anything out of `canceled`, is invalid.
pub fn check_transition(
    from: BookingStatus,
    to: BookingStatus,
    relation: Relation,
) -> Result<(), TransitionError> {
    use BookingStatus::*;

    if !relation.owns_field && !relation.made_booking {
        return Err(TransitionError::NotAParty);
    }

    let allowed = match (from, to) {
        (Pending, Confirmed) => relation.owns_field,
        (Pending, Canceled) => true,
        (Confirmed, Canceled) => relation.owns_field,
        _ => return Err(TransitionError::Invalid { from, to }),
    };

    if allowed {
        Ok(())
    } else {
        Err(TransitionError::ActorNotAllowed { from, to })
    }
}
