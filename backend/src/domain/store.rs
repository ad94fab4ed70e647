//! Bounded access to the driven stores shared by every domain service.
//!
//! Every repository call goes through [`Stores::bounded`], which applies the
//! configured timeout and maps adapter errors onto domain errors. Elapsed
//! timeouts and connection failures become `service_unavailable`, which is
//! the only error class callers may retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::warn;

use super::ports::{
    HotelRepository, HotelRepositoryError, RoomRepository, RoomRepositoryError,
    UserPersistenceError, UserRepository,
};
use super::{Error, Hotel, HotelId, Room, RoomId, User, UserId};

/// Default upper bound for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict("email already registered").with_details(json!({
                "email": email,
                "code": "duplicate_email",
            }))
        }
        UserPersistenceError::OwnsHotels { user_id } => landlord_owns_hotels(user_id),
    }
}

pub(crate) fn landlord_owns_hotels(user_id: impl Into<i64>) -> Error {
    Error::conflict("user still owns hotels").with_details(json!({
        "userId": user_id.into(),
        "code": "landlord_owns_hotels",
    }))
}

pub(crate) fn map_hotel_error(error: HotelRepositoryError) -> Error {
    match error {
        HotelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hotel store unavailable: {message}"))
        }
        HotelRepositoryError::Query { message } => {
            Error::internal(format!("hotel store error: {message}"))
        }
        HotelRepositoryError::LandlordNotFound { landlord_id } => {
            Error::not_found("user not found").with_details(json!({
                "userId": landlord_id,
                "code": "user_not_found",
            }))
        }
    }
}

pub(crate) fn map_room_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("room store unavailable: {message}"))
        }
        RoomRepositoryError::Query { message } => {
            Error::internal(format!("room store error: {message}"))
        }
        RoomRepositoryError::RoomNotFound { room_id } => room_not_found(room_id),
        RoomRepositoryError::HotelNotFound { hotel_id } => hotel_not_found(hotel_id),
        RoomRepositoryError::RevisionMismatch { expected, actual } => {
            Error::conflict("room was modified concurrently").with_details(json!({
                "expectedRevision": expected,
                "actualRevision": actual,
                "code": "revision_mismatch",
            }))
        }
    }
}

pub(crate) fn room_not_found(room_id: impl Into<i64>) -> Error {
    Error::not_found("room not found").with_details(json!({
        "roomId": room_id.into(),
        "code": "room_not_found",
    }))
}

pub(crate) fn hotel_not_found(hotel_id: impl Into<i64>) -> Error {
    Error::not_found("hotel not found").with_details(json!({
        "hotelId": hotel_id.into(),
        "code": "hotel_not_found",
    }))
}

pub(crate) fn user_not_found(user_id: UserId) -> Error {
    Error::not_found("user not found").with_details(json!({
        "userId": user_id.get(),
        "code": "user_not_found",
    }))
}

/// Repository handles plus the per-call timeout.
pub struct Stores<U, H, R> {
    users: Arc<U>,
    hotels: Arc<H>,
    rooms: Arc<R>,
    timeout: Duration,
}

impl<U, H, R> Clone for Stores<U, H, R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hotels: Arc::clone(&self.hotels),
            rooms: Arc::clone(&self.rooms),
            timeout: self.timeout,
        }
    }
}

impl<U, H, R> Stores<U, H, R> {
    /// Bundle the repositories with [`DEFAULT_STORE_TIMEOUT`].
    pub fn new(users: Arc<U>, hotels: Arc<H>, rooms: Arc<R>) -> Self {
        Self {
            users,
            hotels,
            rooms,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn users(&self) -> &U {
        &self.users
    }

    pub(crate) fn hotels(&self) -> &H {
        &self.hotels
    }

    pub(crate) fn rooms(&self) -> &R {
        &self.rooms
    }

    /// Run one store call under the timeout, mapping its error.
    pub(crate) async fn bounded<T, E, F>(
        &self,
        operation: &'static str,
        call: F,
        map_error: fn(E) -> Error,
    ) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(map_error),
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, timeout_ms, "store call timed out");
                Err(
                    Error::service_unavailable(format!("{operation} timed out")).with_details(
                        json!({
                            "operation": operation,
                            "timeoutMs": timeout_ms,
                            "code": "store_timeout",
                        }),
                    ),
                )
            }
        }
    }
}

impl<U, H, R> Stores<U, H, R>
where
    U: UserRepository,
    H: HotelRepository,
    R: RoomRepository,
{
    pub(crate) async fn user(&self, id: UserId) -> Result<User, Error> {
        self.bounded("find user", self.users.find_by_id(id), map_user_error)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub(crate) async fn hotel(&self, id: HotelId) -> Result<Hotel, Error> {
        self.bounded("find hotel", self.hotels.find_by_id(id), map_hotel_error)
            .await?
            .ok_or_else(|| hotel_not_found(id))
    }

    pub(crate) async fn room(&self, id: RoomId) -> Result<Room, Error> {
        self.bounded("find room", self.rooms.find_by_id(id), map_room_error)
            .await?
            .ok_or_else(|| room_not_found(id))
    }
}

/// Reject actors who do not own `hotel`.
pub(crate) fn ensure_owner(hotel: &Hotel, actor: UserId) -> Result<(), Error> {
    if hotel.is_owned_by(actor) {
        return Ok(());
    }
    Err(
        Error::forbidden("you are not the owner of this hotel").with_details(json!({
            "hotelId": hotel.id().get(),
            "code": "not_hotel_owner",
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockHotelRepository, MockRoomRepository, MockUserRepository};
    use rstest::rstest;

    type MockStores = Stores<MockUserRepository, MockHotelRepository, MockRoomRepository>;

    fn stores(timeout: Duration) -> MockStores {
        Stores::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockHotelRepository::new()),
            Arc::new(MockRoomRepository::new()),
        )
        .with_timeout(timeout)
    }

    #[tokio::test]
    async fn slow_calls_surface_as_service_unavailable() {
        let stores = stores(Duration::from_millis(10));
        let error = stores
            .bounded(
                "slow call",
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<(), RoomRepositoryError>(())
                },
                map_room_error,
            )
            .await
            .expect_err("timed out");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(error.code().is_transient());
    }

    #[tokio::test]
    async fn adapter_errors_are_mapped() {
        let stores = stores(DEFAULT_STORE_TIMEOUT);
        let error = stores
            .bounded(
                "failing call",
                async { Err::<(), _>(RoomRepositoryError::revision_mismatch(1_u32, 2_u32)) },
                map_room_error,
            )
            .await
            .expect_err("mapped error");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(RoomRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(RoomRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    #[case(RoomRepositoryError::room_not_found(3_i64), ErrorCode::NotFound)]
    #[case(RoomRepositoryError::hotel_not_found(4_i64), ErrorCode::NotFound)]
    fn room_errors_map_to_codes(#[case] error: RoomRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_room_error(error).code(), code);
    }

    #[rstest]
    fn duplicate_email_is_a_conflict() {
        let error = map_user_error(UserPersistenceError::duplicate_email("a@b.io"));
        assert_eq!(error.code(), ErrorCode::Conflict);
    }
}
