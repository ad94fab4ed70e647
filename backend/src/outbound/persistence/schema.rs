//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered users. Owned hotels and booked rooms are derived from
    /// `hotels.landlord_id` and `rooms.booked_by`.
    users (id) {
        id -> Int8,
        /// Unique, stored lowercased.
        email -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        /// One of `CLIENT`, `LANDLORD`, `ADMIN`.
        role -> Varchar,
        created_at -> Timestamptz,
        /// One of `RU`, `EN`, `KZ`.
        language -> Varchar,
    }
}

diesel::table! {
    /// Hotels with exactly one landlord.
    hotels (id) {
        id -> Int8,
        landlord_id -> Int8,
        name -> Varchar,
        description -> Text,
        address -> Text,
        phone_number -> Varchar,
        two_gis_url -> Nullable<Text>,
        google_maps_url -> Nullable<Text>,
        telegram -> Nullable<Varchar>,
        photos -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rooms. `booked_by` is the whole booking state; `revision` guards
    /// booking transitions and deletion.
    rooms (id) {
        id -> Int8,
        hotel_id -> Int8,
        number -> Varchar,
        description -> Text,
        rooms_number -> Int4,
        photos -> Array<Text>,
        booked_by -> Nullable<Int8>,
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(hotels -> users (landlord_id));
diesel::joinable!(rooms -> hotels (hotel_id));

diesel::allow_tables_to_appear_in_same_query!(users, hotels, rooms);
