//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, Hotel, Room, User, UserId};

/// A user with their computed collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The user record.
    pub user: User,
    /// Hotels where the user is the landlord.
    pub owned_hotels: Vec<Hotel>,
    /// Rooms the user currently holds.
    pub booked_rooms: Vec<Room>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve a user by id; `not_found` when unknown.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;

    /// The user together with owned hotels and booked rooms.
    async fn profile(&self, id: UserId) -> Result<UserProfile, Error>;

    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
