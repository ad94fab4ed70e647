//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Timestamp columns are left out of the read
//! rows; nothing above this layer consumes them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{hotels, rooms, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub language: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub role: &'a str,
    pub language: &'a str,
}

// ---------------------------------------------------------------------------
// Hotel models
// ---------------------------------------------------------------------------

/// Row struct for reading from the hotels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HotelRow {
    pub id: i64,
    pub landlord_id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub two_gis_url: Option<String>,
    pub google_maps_url: Option<String>,
    pub telegram: Option<String>,
    pub photos: Vec<String>,
}

/// Insertable struct for creating hotel records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hotels)]
pub(crate) struct NewHotelRow<'a> {
    pub landlord_id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub two_gis_url: Option<&'a str>,
    pub google_maps_url: Option<&'a str>,
    pub telegram: Option<&'a str>,
    pub photos: &'a [String],
}

// ---------------------------------------------------------------------------
// Room models
// ---------------------------------------------------------------------------

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: i64,
    pub hotel_id: i64,
    pub number: String,
    pub description: String,
    pub rooms_number: i32,
    pub photos: Vec<String>,
    pub booked_by: Option<i64>,
    pub revision: i32,
}

/// Insertable struct for creating rooms. Booking state and revision take
/// their column defaults (free, 1).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub hotel_id: i64,
    pub number: &'a str,
    pub description: &'a str,
    pub rooms_number: i32,
    pub photos: &'a [String],
}

/// Changeset for landlord edits; never touches `booked_by` or `revision`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomDetailsUpdate<'a> {
    pub number: &'a str,
    pub description: &'a str,
    pub rooms_number: i32,
    pub photos: &'a [String],
    pub updated_at: DateTime<Utc>,
}
