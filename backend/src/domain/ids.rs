//! Integer identifiers for users, hotels, and rooms.
//!
//! Identifiers are database-assigned positive integers. Each entity gets its
//! own newtype so a room id can never be passed where a hotel id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifier was zero or negative.
    #[error("{kind} id must be a positive integer, got {value}")]
    NotPositive { kind: &'static str, value: i64 },
    /// Identifier text was not an integer.
    #[error("{kind} id must be an integer")]
    NotNumeric { kind: &'static str },
}

macro_rules! define_entity_id {
    ($(#[$outer:meta])* $name:ident => $kind:literal) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub const fn new(value: i64) -> Result<Self, IdValidationError> {
                if value <= 0 {
                    return Err(IdValidationError::NotPositive { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// Raw integer value as stored in the database.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotNumeric { kind: $kind })?;
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a registered user.
    UserId => "user"
}

define_entity_id! {
    /// Identifier of a hotel.
    HotelId => "hotel"
}

define_entity_id! {
    /// Identifier of a bookable room.
    RoomId => "room"
}
