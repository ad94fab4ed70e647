//! Port for room persistence with optimistic concurrency.
//!
//! Booking transitions and deletions are compare-and-swap writes guarded by
//! the room's revision. Adapters must apply the check and the write as one
//! atomic step so that two transitions can never both commit against the same
//! observed revision.

use async_trait::async_trait;

use crate::domain::{HotelId, NewRoom, Room, RoomBooking, RoomDetails, RoomId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "room repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "room repository query failed: {message}",
        /// The room targeted by a write no longer exists.
        RoomNotFound { room_id: i64 } =>
            "room not found: {room_id}",
        /// The hotel referenced by a new room does not exist.
        HotelNotFound { hotel_id: i64 } =>
            "hotel not found: {hotel_id}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Room store.
///
/// # Revision semantics
///
/// - New rooms start at [`Room::INITIAL_REVISION`] in the free state.
/// - [`RoomRepository::save_booking`] increments the revision on success.
/// - [`RoomRepository::update_details`] leaves booking state and revision
///   untouched.
/// - Guarded writes fail with [`RoomRepositoryError::RevisionMismatch`] when
///   the stored revision differs from the expected one and with
///   [`RoomRepositoryError::RoomNotFound`] when the row is gone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a free room and return it with its assigned id.
    async fn insert(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError>;

    /// Fetch a room by identifier.
    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError>;

    /// List all rooms ordered by id.
    async fn list(&self) -> Result<Vec<Room>, RoomRepositoryError>;

    /// List rooms belonging to `hotel`, ordered by id.
    async fn list_by_hotel(&self, hotel: HotelId) -> Result<Vec<Room>, RoomRepositoryError>;

    /// List rooms currently booked by `user`, ordered by id.
    async fn list_booked_by(&self, user: UserId) -> Result<Vec<Room>, RoomRepositoryError>;

    /// Replace landlord-editable details; returns `None` if the room is gone.
    async fn update_details(
        &self,
        id: RoomId,
        details: &RoomDetails,
    ) -> Result<Option<Room>, RoomRepositoryError>;

    /// Write a new booking state if the stored revision still equals
    /// `expected_revision`.
    async fn save_booking(
        &self,
        id: RoomId,
        booking: RoomBooking,
        expected_revision: u32,
    ) -> Result<Room, RoomRepositoryError>;

    /// Delete the room if the stored revision still equals
    /// `expected_revision`.
    async fn delete(&self, id: RoomId, expected_revision: u32) -> Result<(), RoomRepositoryError>;
}
