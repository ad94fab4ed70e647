//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here describe their
//! wire shape so the adapter layer owns every framework concern. Handlers
//! reference them as `body = ErrorSchema`; the published names match the
//! domain types.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The `X-Authenticated-User` header is missing or names no user.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The user's role or ownership does not permit the action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The room is already booked or changed concurrently.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unavailable; retry later.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "room is already booked")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = Role)]
pub enum RoleSchema {
    /// Books and releases rooms.
    #[schema(rename = "CLIENT")]
    Client,
    /// Owns hotels and manages their rooms.
    #[schema(rename = "LANDLORD")]
    Landlord,
    /// Administers users.
    #[schema(rename = "ADMIN")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::Language`].
#[derive(ToSchema)]
#[schema(as = Language)]
pub enum LanguageSchema {
    /// Russian; the default for new users.
    #[schema(rename = "RU")]
    Ru,
    /// English.
    #[schema(rename = "EN")]
    En,
    /// Kazakh.
    #[schema(rename = "KZ")]
    Kz,
}
