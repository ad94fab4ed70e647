//! User lookups, profiles, and account changes.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    HotelRepository, RoomRepository, UserProfile, UserRemoval, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::store::{
    Stores, map_hotel_error, map_room_error, map_user_error, user_not_found,
};
use crate::domain::{Error, Language, User, UserId};

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UsersService<U, H, R> {
    stores: Stores<U, H, R>,
}

impl<U, H, R> UsersService<U, H, R> {
    /// Create the service over the given stores.
    pub fn new(stores: Stores<U, H, R>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl<U, H, R> UsersQuery for UsersService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        self.stores.user(id).await
    }

    async fn profile(&self, id: UserId) -> Result<UserProfile, Error> {
        let user = self.stores.user(id).await?;
        let owned_hotels = self
            .stores
            .bounded(
                "list owned hotels",
                self.stores.hotels().list_by_landlord(id),
                map_hotel_error,
            )
            .await?;
        let booked_rooms = self
            .stores
            .bounded(
                "list booked rooms",
                self.stores.rooms().list_booked_by(id),
                map_room_error,
            )
            .await?;
        Ok(UserProfile {
            user,
            owned_hotels,
            booked_rooms,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.stores
            .bounded("list users", self.stores.users().list(), map_user_error)
            .await
    }
}

#[async_trait]
impl<U, H, R> UsersCommand for UsersService<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    async fn change_language(&self, actor: UserId, language: Language) -> Result<User, Error> {
        let user = self.stores.user(actor).await?;
        if user.language() == language {
            return Ok(user);
        }
        let updated = self
            .stores
            .bounded(
                "update language",
                self.stores.users().update_language(actor, language),
                map_user_error,
            )
            .await?
            .ok_or_else(|| user_not_found(actor))?;
        info!(user_id = %actor, language = language.as_str(), "language changed");
        Ok(updated)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<UserRemoval, Error> {
        self.stores.user(user_id).await?;
        let owned = self
            .stores
            .bounded(
                "list owned hotels",
                self.stores.hotels().list_by_landlord(user_id),
                map_hotel_error,
            )
            .await?;
        if !owned.is_empty() {
            return Err(Error::conflict("user still owns hotels").with_details(json!({
                "userId": user_id.get(),
                "hotelCount": owned.len(),
                "code": "landlord_owns_hotels",
            })));
        }

        let released_rooms = self
            .stores
            .bounded(
                "delete user",
                self.stores.users().delete(user_id),
                map_user_error,
            )
            .await?
            .ok_or_else(|| user_not_found(user_id))?;
        info!(
            user_id = %user_id,
            released_rooms = released_rooms.len(),
            "user deleted"
        );
        Ok(UserRemoval {
            user_id,
            released_rooms,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        MockHotelRepository, MockRoomRepository, MockUserRepository, UserPersistenceError,
    };
    use crate::domain::test_support::{hotel, room, room_id, user, user_id};
    use crate::domain::{ErrorCode, Role, RoomBooking};
    use mockall::predicate::eq;

    fn service(
        users: MockUserRepository,
        hotels: MockHotelRepository,
        rooms: MockRoomRepository,
    ) -> UsersService<MockUserRepository, MockHotelRepository, MockRoomRepository> {
        UsersService::new(Stores::new(Arc::new(users), Arc::new(hotels), Arc::new(rooms)))
    }

    #[tokio::test]
    async fn profile_collects_derived_lists() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(7, Role::Client))));
        let mut hotels = MockHotelRepository::new();
        hotels.expect_list_by_landlord().return_once(|_| Ok(vec![]));
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_list_booked_by()
            .return_once(|_| Ok(vec![room(1, 10, RoomBooking::Booked { by: user_id(7) })]));

        let profile = service(users, hotels, rooms)
            .profile(user_id(7))
            .await
            .expect("profile");

        assert!(profile.owned_hotels.is_empty());
        assert_eq!(profile.booked_rooms.len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let error = service(users, MockHotelRepository::new(), MockRoomRepository::new())
            .find_user(user_id(404))
            .await
            .expect_err("missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_outage_is_transient() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .return_once(|| Err(UserPersistenceError::connection("refused")));

        let error = service(users, MockHotelRepository::new(), MockRoomRepository::new())
            .list_users()
            .await
            .expect_err("outage");

        assert!(error.code().is_transient());
    }

    #[tokio::test]
    async fn language_change_is_stored() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(7, Role::Client))));
        users
            .expect_update_language()
            .with(eq(user_id(7)), eq(Language::En))
            .times(1)
            .return_once(|_, language| Ok(Some(user(7, Role::Client).with_language(language))));

        let updated = service(users, MockHotelRepository::new(), MockRoomRepository::new())
            .change_language(user_id(7), Language::En)
            .await
            .expect("changed");

        assert_eq!(updated.language(), Language::En);
    }

    #[tokio::test]
    async fn unchanged_language_skips_the_write() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(7, Role::Client))));
        users.expect_update_language().never();

        let same = service(users, MockHotelRepository::new(), MockRoomRepository::new())
            .change_language(user_id(7), Language::Ru)
            .await
            .expect("no-op");

        assert_eq!(same.language(), Language::Ru);
    }

    #[tokio::test]
    async fn deleting_a_client_reports_released_rooms() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(7, Role::Client))));
        users
            .expect_delete()
            .with(eq(user_id(7)))
            .times(1)
            .return_once(|_| Ok(Some(vec![room_id(1), room_id(2)])));
        let mut hotels = MockHotelRepository::new();
        hotels.expect_list_by_landlord().return_once(|_| Ok(vec![]));

        let removal = service(users, hotels, MockRoomRepository::new())
            .delete_user(user_id(7))
            .await
            .expect("deleted");

        assert_eq!(removal.user_id, user_id(7));
        assert_eq!(removal.released_rooms, vec![room_id(1), room_id(2)]);
    }

    #[tokio::test]
    async fn landlords_with_hotels_cannot_be_deleted() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(2, Role::Landlord))));
        users.expect_delete().never();
        let mut hotels = MockHotelRepository::new();
        hotels
            .expect_list_by_landlord()
            .return_once(|_| Ok(vec![hotel(10, 2)]));

        let error = service(users, hotels, MockRoomRepository::new())
            .delete_user(user_id(2))
            .await
            .expect_err("still a landlord");

        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error.details().and_then(|d| d.get("hotelCount")),
            Some(&serde_json::json!(1))
        );
    }

    #[tokio::test]
    async fn hotel_registered_mid_delete_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(2, Role::Landlord))));
        users
            .expect_delete()
            .return_once(|_| Err(UserPersistenceError::owns_hotels(2_i64)));
        let mut hotels = MockHotelRepository::new();
        hotels.expect_list_by_landlord().return_once(|_| Ok(vec![]));

        let error = service(users, hotels, MockRoomRepository::new())
            .delete_user(user_id(2))
            .await
            .expect_err("raced");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }
}
