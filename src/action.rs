use thiserror::Error;

use crate::model::entity::GuestId;
use crate::solution::{Assignment, SeatingPlan};
use crate::table::SeatIndex;

/// Atomic changes an optimizer may make to an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Seat `guest` at an empty `seat`.
    Assign { seat: SeatIndex, guest: GuestId },
    /// Empty `seat`. Emptying an empty seat changes nothing.
    Unassign(SeatIndex),
    /// Exchange the occupants, or emptiness, of two seats.
    Swap(SeatIndex, SeatIndex),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("seat index {0} is outside the plan")]
    InvalidSeat(SeatIndex),
    #[error("guest {0} is not registered")]
    UnknownGuest(GuestId),
    #[error("seat index {0} is already occupied")]
    SeatOccupied(SeatIndex),
}

impl Move {
    /// Seats whose occupant may change.
    pub fn seats(&self) -> [SeatIndex; 2] {
        match *self {
            Move::Assign { seat, .. } => [seat, seat],
            Move::Unassign(seat) => [seat, seat],
            Move::Swap(a, b) => [a, b],
        }
    }

    /// Occupants of the touched seats once the move is done.
    pub fn outcome(&self, assignment: &Assignment) -> [(SeatIndex, Option<GuestId>); 2] {
        match *self {
            Move::Assign { seat, guest } => [(seat, Some(guest)), (seat, Some(guest))],
            Move::Unassign(seat) => [(seat, None), (seat, None)],
            Move::Swap(a, b) => [(a, assignment.get(b)), (b, assignment.get(a))],
        }
    }

    pub fn validate(&self, plan: &SeatingPlan, assignment: &Assignment) -> Result<(), ActionError> {
        for seat in self.seats() {
            if seat >= plan.topology.len() || seat >= assignment.len() {
                return Err(ActionError::InvalidSeat(seat));
            }
        }
        if let Move::Assign { seat, guest } = *self {
            if !plan.registry.contains(guest) {
                return Err(ActionError::UnknownGuest(guest));
            }
            if assignment.get(seat).is_some() {
                return Err(ActionError::SeatOccupied(seat));
            }
        }
        Ok(())
    }

    /// Validates and applies the move in place.
    pub fn apply(
        &self,
        plan: &SeatingPlan,
        assignment: &mut Assignment,
    ) -> Result<(), ActionError> {
        self.validate(plan, assignment)?;
        match *self {
            Move::Assign { seat, guest } => {
                assignment.set(seat, Some(guest));
            }
            Move::Unassign(seat) => {
                assignment.set(seat, None);
            }
            Move::Swap(a, b) => assignment.swap(a, b),
        }
        Ok(())
    }
}
