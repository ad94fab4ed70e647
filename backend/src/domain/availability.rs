//! Read-side availability projection.
//!
//! Availability is derived from the current rooms on every read and never
//! written back to storage, so it cannot go stale after a book or release.

use std::collections::HashMap;

use super::{Hotel, HotelId, Room};

/// A hotel together with its rooms and the count of rooms free to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelAvailability {
    hotel: Hotel,
    rooms: Vec<Room>,
    available_rooms_count: usize,
}

impl HotelAvailability {
    /// Project availability for `hotel` from `rooms`.
    ///
    /// Rooms belonging to other hotels are ignored.
    #[must_use]
    pub fn project(hotel: Hotel, rooms: Vec<Room>) -> Self {
        let rooms: Vec<Room> = rooms
            .into_iter()
            .filter(|room| room.hotel_id() == hotel.id())
            .collect();
        let available_rooms_count = rooms.iter().filter(|room| room.is_available()).count();
        Self {
            hotel,
            rooms,
            available_rooms_count,
        }
    }

    /// The projected hotel.
    #[must_use]
    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// Every room of the hotel, booked or not.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Rooms currently free to book.
    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.is_available())
    }

    /// Number of rooms with no holder.
    #[must_use]
    pub fn available_rooms_count(&self) -> usize {
        self.available_rooms_count
    }

    /// Whether at least one room is free.
    #[must_use]
    pub fn has_availability(&self) -> bool {
        self.available_rooms_count > 0
    }
}

/// Project availability for every hotel, keeping input order.
#[must_use]
pub fn project_all(hotels: Vec<Hotel>, rooms: Vec<Room>) -> Vec<HotelAvailability> {
    let mut by_hotel: HashMap<HotelId, Vec<Room>> = HashMap::new();
    for room in rooms {
        by_hotel.entry(room.hotel_id()).or_default().push(room);
    }
    hotels
        .into_iter()
        .map(|hotel| {
            let rooms = by_hotel.remove(&hotel.id()).unwrap_or_default();
            HotelAvailability::project(hotel, rooms)
        })
        .collect()
}

/// Hotels shown in the public listing.
///
/// Hotels with no free room, including hotels with no rooms at all, are
/// dropped from the result.
#[must_use]
pub fn listable_hotels(hotels: Vec<Hotel>, rooms: Vec<Room>) -> Vec<HotelAvailability> {
    project_all(hotels, rooms)
        .into_iter()
        .filter(HotelAvailability::has_availability)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{hotel, room, user_id};
    use crate::domain::RoomBooking;
    use rstest::rstest;

    #[rstest]
    fn counts_only_free_rooms() {
        let rooms = vec![
            room(1, 10, RoomBooking::Free),
            room(2, 10, RoomBooking::from_booker(Some(user_id(7)))),
            room(3, 10, RoomBooking::Free),
        ];
        let projection = HotelAvailability::project(hotel(10, 1), rooms);
        assert_eq!(projection.available_rooms_count(), 2);
        assert_eq!(projection.rooms().len(), 3);
        let free: Vec<i64> = projection
            .available_rooms()
            .map(|room| room.id().get())
            .collect();
        assert_eq!(free, vec![1, 3]);
    }

    #[rstest]
    fn ignores_rooms_of_other_hotels() {
        let projection =
            HotelAvailability::project(hotel(10, 1), vec![room(1, 11, RoomBooking::Free)]);
        assert_eq!(projection.available_rooms_count(), 0);
        assert!(projection.rooms().is_empty());
    }

    #[rstest]
    fn listing_drops_full_and_empty_hotels() {
        let booker = user_id(7);
        let hotels = vec![hotel(10, 1), hotel(11, 1), hotel(12, 2)];
        let rooms = vec![
            room(1, 10, RoomBooking::Free),
            room(2, 11, RoomBooking::Booked { by: booker }),
        ];
        let listed: Vec<i64> = listable_hotels(hotels, rooms)
            .iter()
            .map(|entry| entry.hotel().id().get())
            .collect();
        assert_eq!(listed, vec![10]);
    }

    #[rstest]
    fn project_all_keeps_every_hotel() {
        let hotels = vec![hotel(10, 1), hotel(11, 1)];
        let projections = project_all(hotels, vec![room(1, 11, RoomBooking::Free)]);
        let counts: Vec<usize> = projections
            .iter()
            .map(HotelAvailability::available_rooms_count)
            .collect();
        assert_eq!(counts, vec![0, 1]);
    }
}
