//! Booking engine: the room booking/release state machine.
//!
//! All preconditions are checked before any write. The single write of each
//! transition is a compare-and-swap on the room revision observed during the
//! checks, so of two racing transitions on one room exactly one commits and
//! the other fails with `conflict`.

mod authority;

pub use authority::{
    BookerAuthority, HotelOwnerAuthority, ReleaseAuthority, ReleaseContext, authority_for,
};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BookingCommand, HotelRepository, RoomRepository, RoomRepositoryError, UserRepository,
};
use crate::domain::store::{Stores, map_room_error};
use crate::domain::{Error, Room, RoomBooking, RoomId, UserId};

/// Booking engine implementing [`BookingCommand`].
#[derive(Clone)]
pub struct BookingService<U, H, R> {
    stores: Stores<U, H, R>,
}

impl<U, H, R> BookingService<U, H, R> {
    /// Create the engine over the given stores.
    pub fn new(stores: Stores<U, H, R>) -> Self {
        Self { stores }
    }
}

fn already_booked(room: &Room) -> Error {
    Error::conflict("room is already booked").with_details(json!({
        "roomId": room.id().get(),
        "code": "room_already_booked",
    }))
}

impl<U, H, R> BookingService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn commit(
        &self,
        room: &Room,
        next: RoomBooking,
        operation: &'static str,
    ) -> Result<Room, Error> {
        let save = async {
            self.stores
                .rooms()
                .save_booking(room.id(), next, room.revision())
                .await
                .inspect_err(|error| {
                    if let RoomRepositoryError::RevisionMismatch { actual, .. } = error {
                        warn!(
                            room_id = %room.id(),
                            expected_revision = room.revision(),
                            actual_revision = *actual,
                            operation,
                            "lost booking race"
                        );
                    }
                })
        };
        self.stores.bounded(operation, save, map_room_error).await
    }
}

#[async_trait]
impl<U, H, R> BookingCommand for BookingService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn book_room(&self, room_id: RoomId, actor: UserId) -> Result<Room, Error> {
        let room = self.stores.room(room_id).await?;
        let next = room
            .booking()
            .book(actor)
            .map_err(|_| already_booked(&room))?;
        let booker = self.stores.user(actor).await?;

        let booked = self.commit(&room, next, "book room").await?;
        info!(
            room_id = %booked.id(),
            actor = %booker.id(),
            revision = booked.revision(),
            "room booked"
        );
        Ok(booked)
    }

    async fn release_room(&self, room_id: RoomId, actor: UserId) -> Result<Room, Error> {
        let room = self.stores.room(room_id).await?;
        let releaser = self.stores.user(actor).await?;
        let authority = authority_for(releaser.role()).ok_or_else(|| {
            Error::forbidden("this role may not release rooms").with_details(json!({
                "role": releaser.role().as_str(),
                "code": "release_not_permitted",
            }))
        })?;
        let hotel = self.stores.hotel(room.hotel_id()).await?;
        authority.authorize(&ReleaseContext {
            actor: &releaser,
            room: &room,
            hotel: &hotel,
        })?;

        let Some(previous_booker) = room.booking().booked_by() else {
            debug!(room_id = %room.id(), "release on a free room; nothing to write");
            return Ok(room);
        };

        let released = self
            .commit(&room, room.booking().release(), "release room")
            .await?;
        info!(
            room_id = %released.id(),
            actor = %releaser.id(),
            authority = authority.name(),
            previous_booker = %previous_booker,
            revision = released.revision(),
            "room released"
        );
        Ok(released)
    }
}
