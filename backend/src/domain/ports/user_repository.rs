//! Port for the identity store.
//!
//! The booking core mostly reads users. `insert` exists for provisioning
//! tools; `delete` also frees every room the user held, bumping each room's
//! revision so in-flight booking transitions against it fail.
use async_trait::async_trait;

use crate::domain::{Language, NewUser, RoomId, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already registered this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// The user is still the landlord of at least one hotel.
        OwnsHotels { user_id: i64 } => "user {user_id} still owns hotels",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a new user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List all users ordered by id.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Store a new interface language; `None` when the user is unknown.
    async fn update_language(
        &self,
        id: UserId,
        language: Language,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Atomically free the user's bookings and delete the user.
    ///
    /// Returns the rooms that were released, or `None` when the user is
    /// unknown. Fails with `OwnsHotels` while the user is a landlord of any
    /// hotel.
    async fn delete(&self, id: UserId) -> Result<Option<Vec<RoomId>>, UserPersistenceError>;
}
