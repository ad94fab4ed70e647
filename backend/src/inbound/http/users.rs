//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users/me
//! PUT    /api/v1/users/me/language
//! GET    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! GET    /api/v1/users
//! ```

use actix_web::{delete, get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{UserProfile, UserRemoval};
use crate::domain::{Error, Language, Role, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::hotels::HotelResponse;
use crate::inbound::http::identity::Actor;
use crate::inbound::http::rooms::{RoomResponse, room_list};
use crate::inbound::http::schemas::{ErrorSchema, LanguageSchema, RoleSchema};
use crate::inbound::http::state::HttpState;

/// A registered user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[schema(value_type = RoleSchema)]
    pub role: &'static str,
    #[schema(value_type = LanguageSchema)]
    pub language: &'static str,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            email: user.email().to_string(),
            first_name: user.first_name().map(str::to_owned),
            last_name: user.last_name().map(str::to_owned),
            role: user.role().as_str(),
            language: user.language().as_str(),
        }
    }
}

/// The caller together with the hotels they own and the rooms they hold.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub hotels: Vec<HotelResponse>,
    pub booked_rooms: Vec<RoomResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: UserResponse::from(&profile.user),
            hotels: profile.owned_hotels.iter().map(HotelResponse::from).collect(),
            booked_rooms: room_list(&profile.booked_rooms),
        }
    }
}

/// Interface language chosen by the caller.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LanguageRequest {
    #[schema(example = "EN")]
    pub language: String,
}

impl LanguageRequest {
    fn to_language(&self) -> Result<Language, Error> {
        self.language.parse::<Language>().map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "language",
                "value": self.language,
                "code": "unknown_language",
            }))
        })
    }
}

/// Acknowledgement returned after an administrator removes a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDeletedResponse {
    #[schema(example = "User successfully deleted")]
    pub message: String,
    pub user_id: i64,
    /// Rooms that were booked by the user and are free again.
    pub released_rooms: Vec<i64>,
}

impl From<UserRemoval> for UserDeletedResponse {
    fn from(removal: UserRemoval) -> Self {
        Self {
            message: UserRemoval::MESSAGE.to_owned(),
            user_id: removal.user_id.get(),
            released_rooms: removal.released_rooms.into_iter().map(i64::from).collect(),
        }
    }
}

/// The calling user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.users.profile(actor.id()).await?;
    Ok(web::Json(profile.into()))
}

/// Change the caller's interface language.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/language",
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Unknown language", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "changeLanguage"
)]
#[put("/users/me/language")]
pub async fn change_language(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<LanguageRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let language = payload.to_language()?;
    let user = state
        .users_command
        .change_language(actor.id(), language)
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _actor: Actor,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.find_user(path.into_inner()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// List every user; administrators only.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    actor.require_role(Role::Admin)?;
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Delete a user and free every room they booked; administrators only.
///
/// Landlords must give up their hotels first.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = UserDeletedResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "User still owns hotels", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<UserDeletedResponse>> {
    actor.require_role(Role::Admin)?;
    let removal = state.users_command.delete_user(path.into_inner()).await?;
    Ok(web::Json(removal.into()))
}

#[cfg(test)]
mod tests;
