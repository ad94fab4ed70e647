//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.
//!
//! Booking transitions and deletions are single conditional statements
//! (`... WHERE id = $1 AND revision = $2`). When no row is affected a follow
//! up read distinguishes a vanished room from a stale revision.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{HotelId, NewRoom, Room, RoomBooking, RoomDetails, RoomId, UserId};

use super::diesel_helpers::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error, revision_from_db,
    revision_to_db,
};
use super::models::{NewRoomRow, RoomDetailsUpdate, RoomRow};
use super::pool::{DbPool, PoolError};
use super::schema::rooms;

/// Diesel-backed implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomRepositoryError {
    map_basic_pool_error(error, RoomRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RoomRepositoryError {
    map_basic_diesel_error(
        error,
        RoomRepositoryError::query,
        RoomRepositoryError::connection,
    )
}

fn corrupt(column: &str) -> RoomRepositoryError {
    RoomRepositoryError::query(format!("stored {column} out of range"))
}

fn rooms_number_to_db(rooms_number: u32) -> Result<i32, RoomRepositoryError> {
    i32::try_from(rooms_number).map_err(|_| RoomRepositoryError::query("rooms number too large"))
}

fn row_to_room(row: RoomRow) -> Result<Room, RoomRepositoryError> {
    let id = RoomId::new(row.id).map_err(|_| corrupt("room id"))?;
    let hotel_id = HotelId::new(row.hotel_id).map_err(|_| corrupt("hotel id"))?;
    let booked_by = row
        .booked_by
        .map(UserId::new)
        .transpose()
        .map_err(|_| corrupt("booker id"))?;
    let rooms_number = u32::try_from(row.rooms_number).map_err(|_| corrupt("rooms number"))?;
    let revision = revision_from_db(row.revision).ok_or_else(|| corrupt("revision"))?;
    Ok(Room::new(
        id,
        hotel_id,
        RoomDetails::from_stored(row.number, row.description, rooms_number, row.photos),
        RoomBooking::from_booker(booked_by),
        revision,
    ))
}

fn rows_to_rooms(rows: Vec<RoomRow>) -> Result<Vec<Room>, RoomRepositoryError> {
    rows.into_iter().map(row_to_room).collect()
}

/// Explain why a guarded write matched no row.
async fn guarded_write_failure<C>(conn: &mut C, id: RoomId, expected: u32) -> RoomRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = rooms::table
        .find(id.get())
        .select(rooms::revision)
        .first::<i32>(conn)
        .await
        .optional();

    match current {
        Ok(Some(actual)) => match revision_from_db(actual) {
            Some(actual) => RoomRepositoryError::revision_mismatch(expected, actual),
            None => corrupt("revision"),
        },
        Ok(None) => RoomRepositoryError::room_not_found(id.get()),
        Err(error) => map_diesel_error(error),
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn insert(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = &room.details;
        let row = NewRoomRow {
            hotel_id: room.hotel_id.get(),
            number: details.number(),
            description: details.description(),
            rooms_number: rooms_number_to_db(details.rooms_number())?,
            photos: details.photos(),
        };

        let inserted = diesel::insert_into(rooms::table)
            .values(&row)
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    RoomRepositoryError::hotel_not_found(room.hotel_id.get())
                } else {
                    map_diesel_error(error)
                }
            })?;
        row_to_room(inserted)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoomRow> = rooms::table
            .find(id.get())
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn list(&self) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = rooms::table
            .order(rooms::id.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_rooms(rows)
    }

    async fn list_by_hotel(&self, hotel: HotelId) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = rooms::table
            .filter(rooms::hotel_id.eq(hotel.get()))
            .order(rooms::id.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_rooms(rows)
    }

    async fn list_booked_by(&self, user: UserId) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = rooms::table
            .filter(rooms::booked_by.eq(user.get()))
            .order(rooms::id.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_rooms(rows)
    }

    async fn update_details(
        &self,
        id: RoomId,
        details: &RoomDetails,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = RoomDetailsUpdate {
            number: details.number(),
            description: details.description(),
            rooms_number: rooms_number_to_db(details.rooms_number())?,
            photos: details.photos(),
            updated_at: Utc::now(),
        };

        let row: Option<RoomRow> = diesel::update(rooms::table.find(id.get()))
            .set(&update)
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn save_booking(
        &self,
        id: RoomId,
        booking: RoomBooking,
        expected_revision: u32,
    ) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(expected) = revision_to_db(expected_revision) else {
            return Err(guarded_write_failure(&mut conn, id, expected_revision).await);
        };

        let row: Option<RoomRow> = diesel::update(
            rooms::table.filter(rooms::id.eq(id.get()).and(rooms::revision.eq(expected))),
        )
        .set((
            rooms::booked_by.eq(booking.booked_by().map(UserId::get)),
            rooms::revision.eq(rooms::revision + 1),
            rooms::updated_at.eq(Utc::now()),
        ))
        .returning(RoomRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_room(row),
            None => {
                debug!(room_id = %id, expected_revision, "guarded booking write matched no row");
                Err(guarded_write_failure(&mut conn, id, expected_revision).await)
            }
        }
    }

    async fn delete(&self, id: RoomId, expected_revision: u32) -> Result<(), RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(expected) = revision_to_db(expected_revision) else {
            return Err(guarded_write_failure(&mut conn, id, expected_revision).await);
        };

        let deleted = diesel::delete(
            rooms::table.filter(rooms::id.eq(id.get()).and(rooms::revision.eq(expected))),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(guarded_write_failure(&mut conn, id, expected_revision).await);
        }
        Ok(())
    }
}
