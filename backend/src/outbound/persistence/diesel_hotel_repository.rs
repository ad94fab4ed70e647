//! PostgreSQL-backed `HotelRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HotelRepository, HotelRepositoryError};
use crate::domain::{Hotel, HotelDetails, HotelDetailsDraft, HotelId, NewHotel, UserId};

use super::diesel_helpers::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{HotelRow, NewHotelRow};
use super::pool::{DbPool, PoolError};
use super::schema::hotels;

/// Diesel-backed implementation of the `HotelRepository` port.
#[derive(Clone)]
pub struct DieselHotelRepository {
    pool: DbPool,
}

impl DieselHotelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HotelRepositoryError {
    map_basic_pool_error(error, HotelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HotelRepositoryError {
    map_basic_diesel_error(
        error,
        HotelRepositoryError::query,
        HotelRepositoryError::connection,
    )
}

fn row_to_hotel(row: HotelRow) -> Result<Hotel, HotelRepositoryError> {
    let id = HotelId::new(row.id).map_err(|err| HotelRepositoryError::query(err.to_string()))?;
    let landlord =
        UserId::new(row.landlord_id).map_err(|err| HotelRepositoryError::query(err.to_string()))?;
    let details = HotelDetails::from_stored(HotelDetailsDraft {
        name: row.name,
        description: row.description,
        address: row.address,
        phone_number: row.phone_number,
        two_gis_url: row.two_gis_url,
        google_maps_url: row.google_maps_url,
        telegram: row.telegram,
        photos: row.photos,
    });
    Ok(Hotel::new(id, landlord, details))
}

fn rows_to_hotels(rows: Vec<HotelRow>) -> Result<Vec<Hotel>, HotelRepositoryError> {
    rows.into_iter().map(row_to_hotel).collect()
}

#[async_trait]
impl HotelRepository for DieselHotelRepository {
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = &hotel.details;
        let row = NewHotelRow {
            landlord_id: hotel.landlord_id.get(),
            name: details.name(),
            description: details.description(),
            address: details.address(),
            phone_number: details.phone_number(),
            two_gis_url: details.two_gis_url(),
            google_maps_url: details.google_maps_url(),
            telegram: details.telegram(),
            photos: details.photos(),
        };

        let inserted = diesel::insert_into(hotels::table)
            .values(&row)
            .returning(HotelRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    HotelRepositoryError::landlord_not_found(hotel.landlord_id.get())
                } else {
                    map_diesel_error(error)
                }
            })?;
        row_to_hotel(inserted)
    }

    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<HotelRow> = hotels::table
            .find(id.get())
            .select(HotelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_hotel).transpose()
    }

    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = hotels::table
            .order(hotels::id.asc())
            .select(HotelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_hotels(rows)
    }

    async fn list_by_landlord(&self, landlord: UserId) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = hotels::table
            .filter(hotels::landlord_id.eq(landlord.get()))
            .order(hotels::id.asc())
            .select(HotelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_hotels(rows)
    }
}
