//! Room management and room reads.
//!
//! Every mutation here is scoped to the landlord owning the room's hotel.
//! None of them touch booking state; that belongs to
//! [`crate::domain::BookingService`].

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AddRoomRequest, HotelRepository, RoomRemoval, RoomRepository, RoomsCommand, RoomsQuery,
    UpdateRoomRequest, UserRepository,
};
use crate::domain::store::{Stores, ensure_owner, map_room_error, room_not_found};
use crate::domain::{Error, NewRoom, Room, RoomDetails, RoomId, UserId};

/// Room service implementing [`RoomsCommand`] and [`RoomsQuery`].
#[derive(Clone)]
pub struct RoomsService<U, H, R> {
    stores: Stores<U, H, R>,
}

impl<U, H, R> RoomsService<U, H, R> {
    /// Create the service over the given stores.
    pub fn new(stores: Stores<U, H, R>) -> Self {
        Self { stores }
    }
}

impl<U, H, R> RoomsService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    /// Load a room and confirm `actor` owns its hotel.
    async fn owned_room(&self, room_id: RoomId, actor: UserId) -> Result<Room, Error> {
        let room = self.stores.room(room_id).await?;
        let hotel = self.stores.hotel(room.hotel_id()).await?;
        ensure_owner(&hotel, actor)?;
        Ok(room)
    }
}

#[async_trait]
impl<U, H, R> RoomsCommand for RoomsService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn add_room(&self, request: AddRoomRequest) -> Result<Room, Error> {
        let AddRoomRequest {
            actor,
            hotel_id,
            details,
        } = request;
        let details = RoomDetails::try_from(details)?;
        let landlord = self.stores.user(actor).await?;
        let hotel = self.stores.hotel(hotel_id).await?;
        ensure_owner(&hotel, landlord.id())?;

        let room = self
            .stores
            .bounded(
                "insert room",
                self.stores.rooms().insert(&NewRoom { hotel_id, details }),
                map_room_error,
            )
            .await?;
        info!(room_id = %room.id(), hotel_id = %hotel_id, actor = %actor, "room added");
        Ok(room)
    }

    async fn update_room(&self, request: UpdateRoomRequest) -> Result<Room, Error> {
        let UpdateRoomRequest {
            actor,
            room_id,
            details,
        } = request;
        let details = RoomDetails::try_from(details)?;
        self.owned_room(room_id, actor).await?;

        let updated = self
            .stores
            .bounded(
                "update room",
                self.stores.rooms().update_details(room_id, &details),
                map_room_error,
            )
            .await?
            .ok_or_else(|| room_not_found(room_id))?;
        info!(room_id = %room_id, actor = %actor, "room details updated");
        Ok(updated)
    }

    async fn delete_room(&self, room_id: RoomId, actor: UserId) -> Result<RoomRemoval, Error> {
        let room = self.owned_room(room_id, actor).await?;
        let removal = RoomRemoval {
            room_id,
            hotel_id: room.hotel_id(),
            released_booking: room.booking().booked_by(),
        };

        self.stores
            .bounded(
                "delete room",
                self.stores.rooms().delete(room_id, room.revision()),
                map_room_error,
            )
            .await?;
        info!(
            room_id = %room_id,
            hotel_id = %removal.hotel_id,
            released_booking = ?removal.released_booking.map(UserId::get),
            actor = %actor,
            "room deleted"
        );
        Ok(removal)
    }
}

#[async_trait]
impl<U, H, R> RoomsQuery for RoomsService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        self.stores
            .bounded("list rooms", self.stores.rooms().list(), map_room_error)
            .await
    }

    async fn list_my_rooms(&self, user: UserId) -> Result<Vec<Room>, Error> {
        self.stores
            .bounded(
                "list booked rooms",
                self.stores.rooms().list_booked_by(user),
                map_room_error,
            )
            .await
    }

    async fn get_room(&self, room_id: RoomId) -> Result<Room, Error> {
        self.stores.room(room_id).await
    }
}
