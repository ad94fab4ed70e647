//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe the stores the domain reads and
//! writes; each exposes a typed error enum so adapters map their failures
//! into predictable variants. Driving ports (`*Command`, `*Query`) are the
//! use-cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_command;
mod hotel_repository;
mod hotels_command;
mod hotels_query;
mod room_repository;
mod rooms_command;
mod rooms_query;
mod user_repository;
mod users_command;
mod users_query;

pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use hotel_repository::{HotelRepository, HotelRepositoryError};
#[cfg(test)]
pub use hotel_repository::MockHotelRepository;
pub use hotels_command::HotelsCommand;
#[cfg(test)]
pub use hotels_command::MockHotelsCommand;
pub use hotels_query::HotelsQuery;
#[cfg(test)]
pub use hotels_query::MockHotelsQuery;
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{RoomRepository, RoomRepositoryError};
#[cfg(test)]
pub use rooms_command::MockRoomsCommand;
pub use rooms_command::{AddRoomRequest, RoomRemoval, RoomsCommand, UpdateRoomRequest};
#[cfg(test)]
pub use rooms_query::MockRoomsQuery;
pub use rooms_query::RoomsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{UserRemoval, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserProfile, UsersQuery};
