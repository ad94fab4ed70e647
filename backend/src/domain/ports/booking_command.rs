//! Driving port for room booking transitions.
//!
//! The acting user is always passed explicitly; implementations never read
//! identity from ambient request state.

use async_trait::async_trait;

use crate::domain::{Error, Room, RoomId, UserId};

/// Booking engine use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Move a free room to booked by `actor`.
    ///
    /// Fails with `not_found` for unknown rooms or users and with `conflict`
    /// when the room is already booked or another transition won the race.
    async fn book_room(&self, room_id: RoomId, actor: UserId) -> Result<Room, Error>;

    /// Free a room on behalf of `actor`.
    ///
    /// Whether the actor may release is decided by their role at call time:
    /// clients must hold the booking, landlords must own the room's hotel.
    async fn release_room(&self, room_id: RoomId, actor: UserId) -> Result<Room, Error>;
}
