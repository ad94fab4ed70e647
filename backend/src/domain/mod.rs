//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed booking entities and the services that
//! enforce their consistency rules. Types are transport agnostic; inbound
//! adapters translate them to HTTP and outbound adapters persist them.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload and category.
//! - User, Hotel, Room: aggregates with validated details.
//! - HotelAvailability: projection of free rooms per hotel.
//! - BookingService, RoomsService, HotelsService, UsersService: use-case
//!   implementations of the driving ports in [`ports`].

pub mod availability;
pub mod booking;
pub mod error;
pub mod hotel;
mod hotels_service;
pub mod ids;
pub mod ports;
pub mod room;
mod rooms_service;
mod store;
#[cfg(test)]
pub(crate) mod test_support;
pub mod trace_id;
pub mod user;
mod users_service;
pub mod validation;

pub use self::availability::{HotelAvailability, listable_hotels, project_all};
pub use self::booking::{
    BookerAuthority, BookingService, HotelOwnerAuthority, ReleaseAuthority, ReleaseContext,
    authority_for,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::hotel::{Hotel, HotelDetails, HotelDetailsDraft, NewHotel};
pub use self::hotels_service::HotelsService;
pub use self::ids::{HotelId, IdValidationError, RoomId, UserId};
pub use self::room::{AlreadyBooked, NewRoom, Room, RoomBooking, RoomDetails, RoomDetailsDraft};
pub use self::rooms_service::RoomsService;
pub use self::store::{DEFAULT_STORE_TIMEOUT, Stores};
pub use self::trace_id::TraceId;
pub use self::user::{Email, Language, NewUser, Role, User, UserValidationError};
pub use self::users_service::UsersService;
pub use self::validation::DetailsValidationError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use hotel_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
