//! Room entity and its booking sub-state.
//!
//! A room's occupancy is a single [`RoomBooking`] value, so "booked" and
//! "booked by someone" can never disagree. Landlord edits replace
//! [`RoomDetails`] only; booking state changes go through
//! [`RoomBooking::book`] and [`RoomBooking::release`].

use super::validation::{self, DetailsValidationError};
use super::{HotelId, RoomId, UserId};

/// Booking sub-state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomBooking {
    /// Nobody holds the room.
    #[default]
    Free,
    /// The room is held by a user.
    Booked {
        /// User holding the booking.
        by: UserId,
    },
}

/// Raised when a transition is attempted from the wrong state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("room is already booked by user {holder}")]
pub struct AlreadyBooked {
    /// Current holder of the booking.
    pub holder: UserId,
}

impl RoomBooking {
    /// Rebuild the state from the stored booker column.
    #[must_use]
    pub const fn from_booker(booked_by: Option<UserId>) -> Self {
        match booked_by {
            Some(by) => Self::Booked { by },
            None => Self::Free,
        }
    }

    /// Whether the room is currently held.
    #[must_use]
    pub const fn is_booked(self) -> bool {
        matches!(self, Self::Booked { .. })
    }

    /// User holding the room, if any.
    #[must_use]
    pub const fn booked_by(self) -> Option<UserId> {
        match self {
            Self::Booked { by } => Some(by),
            Self::Free => None,
        }
    }

    /// `FREE -> BOOKED(by)`.
    pub const fn book(self, by: UserId) -> Result<Self, AlreadyBooked> {
        match self {
            Self::Free => Ok(Self::Booked { by }),
            Self::Booked { by: holder } => Err(AlreadyBooked { holder }),
        }
    }

    /// `* -> FREE`.
    #[must_use]
    pub const fn release(self) -> Self {
        Self::Free
    }
}

/// Landlord-editable room details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    number: String,
    description: String,
    rooms_number: u32,
    photos: Vec<String>,
}

/// Unvalidated room details as submitted by a landlord.
///
/// `rooms_number` arrives as text and is parsed during validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomDetailsDraft {
    /// Room label shown to guests, e.g. `"101"`.
    pub number: String,
    /// Free-form description.
    pub description: String,
    /// Count of sub-rooms within the unit.
    pub rooms_number: String,
    /// Photo URLs.
    pub photos: Vec<String>,
}

impl TryFrom<RoomDetailsDraft> for RoomDetails {
    type Error = DetailsValidationError;

    fn try_from(draft: RoomDetailsDraft) -> Result<Self, Self::Error> {
        let RoomDetailsDraft {
            number,
            description,
            rooms_number,
            photos,
        } = draft;
        Ok(Self {
            number: validation::required_text("number", number)?,
            description: validation::required_text("description", description)?,
            rooms_number: validation::positive_count("roomsNumber", &rooms_number)?,
            photos: validation::photo_urls("photos", photos)?,
        })
    }
}

impl RoomDetails {
    /// Rebuild details loaded from storage without re-validating URLs.
    #[must_use]
    pub fn from_stored(
        number: String,
        description: String,
        rooms_number: u32,
        photos: Vec<String>,
    ) -> Self {
        Self {
            number,
            description,
            rooms_number,
            photos,
        }
    }

    /// Room label.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Count of sub-rooms within the unit.
    #[must_use]
    pub fn rooms_number(&self) -> u32 {
        self.rooms_number
    }

    /// Photo URLs.
    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }
}

/// Bookable room.
///
/// `revision` starts at 1 and increases with every booking transition; stores
/// use it as the compare-and-swap token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    hotel_id: HotelId,
    details: RoomDetails,
    booking: RoomBooking,
    revision: u32,
}

impl Room {
    /// Revision assigned to freshly inserted rooms.
    pub const INITIAL_REVISION: u32 = 1;

    /// Assemble a room from stored parts.
    #[must_use]
    pub fn new(
        id: RoomId,
        hotel_id: HotelId,
        details: RoomDetails,
        booking: RoomBooking,
        revision: u32,
    ) -> Self {
        Self {
            id,
            hotel_id,
            details,
            booking,
            revision,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Owning hotel; fixed for the lifetime of the room.
    #[must_use]
    pub fn hotel_id(&self) -> HotelId {
        self.hotel_id
    }

    /// Landlord-editable details.
    #[must_use]
    pub fn details(&self) -> &RoomDetails {
        &self.details
    }

    /// Current booking state.
    #[must_use]
    pub fn booking(&self) -> RoomBooking {
        self.booking
    }

    /// Compare-and-swap token.
    #[must_use]
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Whether the room is free to book.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.booking.is_booked()
    }
}

/// Data needed to insert a new room; rooms always start free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    /// Hotel the room is added to.
    pub hotel_id: HotelId,
    /// Validated details.
    pub details: RoomDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn guest() -> UserId {
        UserId::new(5).expect("valid id")
    }

    #[fixture]
    fn draft() -> RoomDetailsDraft {
        RoomDetailsDraft {
            number: " 101 ".to_owned(),
            description: "Sea view".to_owned(),
            rooms_number: "2".to_owned(),
            photos: vec!["https://cdn.example.com/101.jpg".to_owned()],
        }
    }

    #[rstest]
    fn booking_a_free_room_records_the_holder(guest: UserId) {
        let booked = RoomBooking::Free.book(guest).expect("free room books");
        assert!(booked.is_booked());
        assert_eq!(booked.booked_by(), Some(guest));
    }

    #[rstest]
    fn booking_a_booked_room_reports_the_holder(guest: UserId) {
        let other = UserId::new(6).expect("valid id");
        let err = RoomBooking::Booked { by: guest }
            .book(other)
            .expect_err("already booked");
        assert_eq!(err.holder, guest);
    }

    #[rstest]
    fn release_always_frees(guest: UserId) {
        assert_eq!(RoomBooking::Booked { by: guest }.release(), RoomBooking::Free);
        assert_eq!(RoomBooking::Free.release(), RoomBooking::Free);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(5), true)]
    fn flag_and_holder_always_agree(#[case] booker: Option<i64>, #[case] booked: bool) {
        let holder = booker.map(|raw| UserId::new(raw).expect("valid id"));
        let state = RoomBooking::from_booker(holder);
        assert_eq!(state.is_booked(), booked);
        assert_eq!(state.booked_by(), holder);
    }

    #[rstest]
    fn drafts_are_trimmed_and_parsed(draft: RoomDetailsDraft) {
        let details = RoomDetails::try_from(draft).expect("valid draft");
        assert_eq!(details.number(), "101");
        assert_eq!(details.rooms_number(), 2);
    }

    #[rstest]
    fn non_numeric_room_count_is_rejected(mut draft: RoomDetailsDraft) {
        draft.rooms_number = "two".to_owned();
        let err = RoomDetails::try_from(draft).expect_err("non-numeric count");
        assert_eq!(err.field(), "roomsNumber");
    }
}
