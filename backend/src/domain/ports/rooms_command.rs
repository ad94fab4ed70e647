//! Driving port for landlord room management.

use async_trait::async_trait;

use crate::domain::{Error, HotelId, Room, RoomDetailsDraft, RoomId, UserId};

/// Request to add a room to a hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRoomRequest {
    /// Landlord performing the action.
    pub actor: UserId,
    /// Hotel receiving the room.
    pub hotel_id: HotelId,
    /// Unvalidated room details.
    pub details: RoomDetailsDraft,
}

/// Request to replace a room's editable details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoomRequest {
    /// Landlord performing the action.
    pub actor: UserId,
    /// Room being edited.
    pub room_id: RoomId,
    /// Unvalidated room details.
    pub details: RoomDetailsDraft,
}

/// Record of everything a room deletion removed.
///
/// Hotel room lists and user booking lists are derived from the room row, so
/// deleting the row detaches it from `hotel_id` and drops the booking held by
/// `released_booking` in the same atomic write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomRemoval {
    /// Deleted room.
    pub room_id: RoomId,
    /// Hotel the room was detached from.
    pub hotel_id: HotelId,
    /// Client whose booking disappeared with the room, if any.
    pub released_booking: Option<UserId>,
}

impl RoomRemoval {
    /// Acknowledgement returned to clients.
    pub const MESSAGE: &'static str = "Room successfully deleted";
}

/// Room management use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomsCommand: Send + Sync {
    /// Add a free room to a hotel owned by the actor.
    async fn add_room(&self, request: AddRoomRequest) -> Result<Room, Error>;

    /// Replace number, description, rooms count, and photos. Booking state
    /// is never touched.
    async fn update_room(&self, request: UpdateRoomRequest) -> Result<Room, Error>;

    /// Delete a room of a hotel owned by the actor.
    async fn delete_room(&self, room_id: RoomId, actor: UserId) -> Result<RoomRemoval, Error>;
}
