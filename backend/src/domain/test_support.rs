//! Builders shared by domain unit tests.

use super::{
    Email, Hotel, HotelDetails, HotelDetailsDraft, HotelId, NewUser, Role, Room, RoomBooking,
    RoomDetails, RoomId, User, UserId,
};

pub(crate) fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(crate) fn hotel_id(raw: i64) -> HotelId {
    HotelId::new(raw).expect("valid hotel id")
}

pub(crate) fn room_id(raw: i64) -> RoomId {
    RoomId::new(raw).expect("valid room id")
}

pub(crate) fn user(raw: i64, role: Role) -> User {
    let email = Email::new(format!("user{raw}@example.com")).expect("valid email");
    User::new(user_id(raw), NewUser::new(email, role))
}

pub(crate) fn hotel(raw: i64, landlord: i64) -> Hotel {
    Hotel::new(
        hotel_id(raw),
        user_id(landlord),
        HotelDetails::from_stored(HotelDetailsDraft {
            name: format!("Hotel {raw}"),
            description: "Test hotel".to_owned(),
            address: "1 Test Street".to_owned(),
            phone_number: "+10000000000".to_owned(),
            ..HotelDetailsDraft::default()
        }),
    )
}

pub(crate) fn room(raw: i64, hotel: i64, booking: RoomBooking) -> Room {
    room_at_revision(raw, hotel, booking, Room::INITIAL_REVISION)
}

pub(crate) fn room_at_revision(raw: i64, hotel: i64, booking: RoomBooking, revision: u32) -> Room {
    Room::new(
        room_id(raw),
        hotel_id(hotel),
        RoomDetails::from_stored(format!("{raw}"), "Test room".to_owned(), 1, Vec::new()),
        booking,
        revision,
    )
}
