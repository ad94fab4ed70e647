//! Driving port for account changes.

use async_trait::async_trait;

use crate::domain::{Error, Language, RoomId, User, UserId};

/// Record of a deleted account and the bookings that went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRemoval {
    /// Deleted user.
    pub user_id: UserId,
    /// Rooms that were booked by the user and are free again.
    pub released_rooms: Vec<RoomId>,
}

impl UserRemoval {
    /// Acknowledgement returned to clients.
    pub const MESSAGE: &'static str = "User successfully deleted";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Switch the actor's interface language.
    async fn change_language(&self, actor: UserId, language: Language) -> Result<User, Error>;

    /// Delete a user, releasing every room they hold. Landlords must give up
    /// their hotels first.
    async fn delete_user(&self, user_id: UserId) -> Result<UserRemoval, Error>;
}
