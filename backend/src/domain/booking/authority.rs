//! Release permissions, dispatched on the actor's role.
//!
//! Each role that may release a room maps to one [`ReleaseAuthority`]. Adding
//! a new actor kind means adding an implementation and a match arm in
//! [`authority_for`].

use serde_json::json;

use crate::domain::store::ensure_owner;
use crate::domain::{Error, Hotel, Role, Room, User};

/// Facts an authority may inspect; all loaded before any write happens.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseContext<'a> {
    /// User asking for the release.
    pub actor: &'a User,
    /// Room being released.
    pub room: &'a Room,
    /// Hotel the room belongs to.
    pub hotel: &'a Hotel,
}

/// Capability to release a room.
pub trait ReleaseAuthority: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Succeed when the actor may release the room, else `forbidden`.
    fn authorize(&self, context: &ReleaseContext<'_>) -> Result<(), Error>;
}

/// Clients may release only the booking they hold.
#[derive(Debug, Default, Clone, Copy)]
pub struct BookerAuthority;

impl ReleaseAuthority for BookerAuthority {
    fn name(&self) -> &'static str {
        "booker"
    }

    fn authorize(&self, context: &ReleaseContext<'_>) -> Result<(), Error> {
        if context.room.booking().booked_by() == Some(context.actor.id()) {
            return Ok(());
        }
        Err(
            Error::forbidden("only the client holding the booking may release it").with_details(
                json!({
                    "roomId": context.room.id().get(),
                    "code": "not_the_booker",
                }),
            ),
        )
    }
}

/// Landlords may release any room of a hotel they own, whoever booked it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HotelOwnerAuthority;

impl ReleaseAuthority for HotelOwnerAuthority {
    fn name(&self) -> &'static str {
        "hotel_owner"
    }

    fn authorize(&self, context: &ReleaseContext<'_>) -> Result<(), Error> {
        if context.hotel.id() != context.room.hotel_id() {
            return Err(Error::internal("release context mixes rooms and hotels"));
        }
        ensure_owner(context.hotel, context.actor.id())
    }
}

/// Pick the authority for `role`; `None` means the role may never release.
#[must_use]
pub fn authority_for(role: Role) -> Option<&'static dyn ReleaseAuthority> {
    match role {
        Role::Client => Some(&BookerAuthority),
        Role::Landlord => Some(&HotelOwnerAuthority),
        Role::Admin => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{hotel, room, user, user_id};
    use crate::domain::{ErrorCode, RoomBooking};
    use rstest::rstest;

    #[rstest]
    #[case(Role::Client, Some("booker"))]
    #[case(Role::Landlord, Some("hotel_owner"))]
    #[case(Role::Admin, None)]
    fn roles_map_to_authorities(#[case] role: Role, #[case] expected: Option<&str>) {
        assert_eq!(authority_for(role).map(|authority| authority.name()), expected);
    }

    #[rstest]
    fn booker_may_release_own_booking() {
        let actor = user(7, Role::Client);
        let room = room(1, 10, RoomBooking::Booked { by: user_id(7) });
        let hotel = hotel(10, 2);
        let context = ReleaseContext {
            actor: &actor,
            room: &room,
            hotel: &hotel,
        };
        assert!(BookerAuthority.authorize(&context).is_ok());
    }

    #[rstest]
    #[case(RoomBooking::Booked { by: user_id(8) })]
    #[case(RoomBooking::Free)]
    fn booker_may_not_release_others(#[case] booking: RoomBooking) {
        let actor = user(7, Role::Client);
        let room = room(1, 10, booking);
        let hotel = hotel(10, 2);
        let context = ReleaseContext {
            actor: &actor,
            room: &room,
            hotel: &hotel,
        };
        let err = BookerAuthority.authorize(&context).expect_err("not the booker");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[case(2, true)]
    #[case(3, false)]
    fn owner_check_ignores_booker(#[case] landlord: i64, #[case] allowed: bool) {
        let actor = user(landlord, Role::Landlord);
        let room = room(1, 10, RoomBooking::Booked { by: user_id(7) });
        let hotel = hotel(10, 2);
        let context = ReleaseContext {
            actor: &actor,
            room: &room,
            hotel: &hotel,
        };
        assert_eq!(HotelOwnerAuthority.authorize(&context).is_ok(), allowed);
    }
}
