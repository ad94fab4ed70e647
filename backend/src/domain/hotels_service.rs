//! Hotel creation and catalogue reads.
//!
//! Availability is never stored; every read loads the rooms alongside the
//! hotels and projects it through [`crate::domain::availability`].

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::availability::{listable_hotels, project_all};
use crate::domain::ports::{
    HotelRepository, HotelsCommand, HotelsQuery, RoomRepository, UserRepository,
};
use crate::domain::store::{Stores, map_hotel_error, map_room_error};
use crate::domain::{
    Error, Hotel, HotelAvailability, HotelDetails, HotelDetailsDraft, HotelId, NewHotel, Role,
    UserId,
};

/// Hotel service implementing [`HotelsCommand`] and [`HotelsQuery`].
#[derive(Clone)]
pub struct HotelsService<U, H, R> {
    stores: Stores<U, H, R>,
}

impl<U, H, R> HotelsService<U, H, R> {
    /// Create the service over the given stores.
    pub fn new(stores: Stores<U, H, R>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl<U, H, R> HotelsCommand for HotelsService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn add_hotel(&self, actor: UserId, details: HotelDetailsDraft) -> Result<Hotel, Error> {
        let details = HotelDetails::try_from(details)?;
        let landlord = self.stores.user(actor).await?;
        if landlord.role() != Role::Landlord {
            return Err(
                Error::forbidden("only landlords may register hotels").with_details(json!({
                    "role": landlord.role().as_str(),
                    "code": "landlord_required",
                })),
            );
        }

        let hotel = self
            .stores
            .bounded(
                "insert hotel",
                self.stores.hotels().insert(&NewHotel {
                    landlord_id: actor,
                    details,
                }),
                map_hotel_error,
            )
            .await?;
        info!(hotel_id = %hotel.id(), landlord = %actor, "hotel registered");
        Ok(hotel)
    }
}

#[async_trait]
impl<U, H, R> HotelsQuery for HotelsService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn list_hotels(&self) -> Result<Vec<HotelAvailability>, Error> {
        let hotels = self
            .stores
            .bounded("list hotels", self.stores.hotels().list(), map_hotel_error)
            .await?;
        let rooms = self
            .stores
            .bounded("list rooms", self.stores.rooms().list(), map_room_error)
            .await?;
        Ok(listable_hotels(hotels, rooms))
    }

    async fn get_hotel(&self, hotel_id: HotelId) -> Result<HotelAvailability, Error> {
        let hotel = self.stores.hotel(hotel_id).await?;
        let rooms = self
            .stores
            .bounded(
                "list hotel rooms",
                self.stores.rooms().list_by_hotel(hotel_id),
                map_room_error,
            )
            .await?;
        Ok(HotelAvailability::project(hotel, rooms))
    }

    async fn list_landlord_hotels(
        &self,
        landlord: UserId,
    ) -> Result<Vec<HotelAvailability>, Error> {
        let hotels = self
            .stores
            .bounded(
                "list landlord hotels",
                self.stores.hotels().list_by_landlord(landlord),
                map_hotel_error,
            )
            .await?;
        let mut rooms = Vec::new();
        for hotel in &hotels {
            rooms.extend(
                self.stores
                    .bounded(
                        "list hotel rooms",
                        self.stores.rooms().list_by_hotel(hotel.id()),
                        map_room_error,
                    )
                    .await?,
            );
        }
        Ok(project_all(hotels, rooms))
    }
}
