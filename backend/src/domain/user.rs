//! User data model.
//!
//! Users are owned by the identity store. The booking core reads them by id
//! and only cares about their role and interface language; owned hotels and booked rooms are computed
//! from the hotel and room stores rather than stored on the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors raised when constructing users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email address was blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email address lacked a local part or domain.
    #[error("email must look like local@domain")]
    MalformedEmail,
    /// Role string did not name a known role.
    #[error("unknown role `{0}`; expected CLIENT, LANDLORD, or ADMIN")]
    UnknownRole(String),
    /// Language code did not name a supported language.
    #[error("unknown language `{0}`; expected RU, EN, or KZ")]
    UnknownLanguage(String),
}

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Books and releases rooms.
    #[default]
    Client,
    /// Owns hotels and their rooms.
    Landlord,
    /// Administers the user base.
    Admin,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Landlord => "LANDLORD",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Self::Client),
            "LANDLORD" => Ok(Self::Landlord),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(UserValidationError::UnknownRole(s.to_owned())),
        }
    }
}

/// Interface language chosen by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    #[default]
    Ru,
    En,
    Kz,
}

impl Language {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "RU",
            Self::En => "EN",
            Self::Kz => "KZ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RU" => Ok(Self::Ru),
            "EN" => Ok(Self::En),
            "KZ" => Ok(Self::Kz),
            _ => Err(UserValidationError::UnknownLanguage(s.to_owned())),
        }
    }
}

/// Normalised, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Ok(Self(trimmed.to_ascii_lowercase()))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Role,
    language: Language,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, registration: NewUser) -> Self {
        let NewUser {
            email,
            first_name,
            last_name,
            role,
            language,
        } = registration;
        Self {
            id,
            email,
            first_name,
            last_name,
            role,
            language,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Optional given name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Optional family name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Role resolved at call time for access decisions.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// The same user with a different interface language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Registration data for a user not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login email.
    pub email: Email,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Role assigned at registration.
    pub role: Role,
    /// Interface language; `RU` unless chosen otherwise.
    pub language: Language,
}

impl NewUser {
    /// Registration with only the mandatory fields.
    #[must_use]
    pub fn new(email: Email, role: Role) -> Self {
        Self {
            email,
            first_name: None,
            last_name: None,
            role,
            language: Language::default(),
        }
    }

    /// Attach optional names, dropping blank values.
    #[must_use]
    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name.filter(|name| !name.trim().is_empty());
        self.last_name = last_name.filter(|name| !name.trim().is_empty());
        self
    }

    /// Pick the interface language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CLIENT", Role::Client)]
    #[case("landlord", Role::Landlord)]
    #[case(" Admin ", Role::Admin)]
    fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let err = "guest".parse::<Role>().expect_err("unknown role");
        assert_eq!(err, UserValidationError::UnknownRole("guest".to_owned()));
    }

    #[rstest]
    fn roles_serialise_upper_case() {
        let value = serde_json::to_value(Role::Landlord).expect("serialise role");
        assert_eq!(value, serde_json::json!("LANDLORD"));
    }

    #[rstest]
    #[case("ru", Language::Ru)]
    #[case(" En", Language::En)]
    #[case("KZ", Language::Kz)]
    fn languages_parse_case_insensitively(#[case] raw: &str, #[case] expected: Language) {
        assert_eq!(raw.parse::<Language>().expect("known language"), expected);
    }

    #[rstest]
    fn unknown_language_is_rejected() {
        let err = "fr".parse::<Language>().expect_err("unsupported");
        assert_eq!(err, UserValidationError::UnknownLanguage("fr".to_owned()));
    }

    #[rstest]
    fn registrations_default_to_russian() {
        let email = Email::new("a@b.io").expect("valid email");
        assert_eq!(NewUser::new(email, Role::Client).language, Language::Ru);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("nobody", UserValidationError::MalformedEmail)]
    #[case("@example.com", UserValidationError::MalformedEmail)]
    #[case("a@localhost", UserValidationError::MalformedEmail)]
    fn malformed_emails_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
    }

    #[rstest]
    fn emails_are_normalised() {
        let email = Email::new(" Guest@Example.COM ").expect("valid email");
        assert_eq!(email.as_ref(), "guest@example.com");
    }

    #[rstest]
    fn blank_names_are_dropped() {
        let email = Email::new("a@b.io").expect("valid email");
        let registration = NewUser::new(email, Role::Client)
            .with_names(Some("  ".to_owned()), Some("Smith".to_owned()));
        assert_eq!(registration.first_name, None);
        assert_eq!(registration.last_name.as_deref(), Some("Smith"));
    }
}
