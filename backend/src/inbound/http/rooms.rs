//! Rooms API handlers.
//!
//! ```text
//! GET    /api/v1/rooms
//! GET    /api/v1/rooms/mine
//! GET    /api/v1/rooms/{id}
//! PUT    /api/v1/rooms/{id}
//! DELETE /api/v1/rooms/{id}
//! POST   /api/v1/rooms/{id}/booking
//! DELETE /api/v1/rooms/{id}/booking
//! POST   /api/v1/hotels/{id}/rooms
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AddRoomRequest, RoomRemoval, UpdateRoomRequest};
use crate::domain::{HotelId, Role, Room, RoomDetailsDraft, RoomId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Actor;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Room details submitted by a landlord.
///
/// `roomsNumber` is accepted as text and must parse to a positive integer.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    #[schema(example = "101")]
    pub number: String,
    #[schema(example = "Sea view, two beds")]
    pub description: String,
    #[schema(example = "2")]
    pub rooms_number: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl From<RoomRequest> for RoomDetailsDraft {
    fn from(value: RoomRequest) -> Self {
        Self {
            number: value.number,
            description: value.description,
            rooms_number: value.rooms_number,
            photos: value.photos,
        }
    }
}

/// A room as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    #[schema(example = 12)]
    pub id: i64,
    #[schema(example = 3)]
    pub hotel_id: i64,
    pub number: String,
    pub description: String,
    #[schema(example = 2)]
    pub rooms_number: u32,
    pub photos: Vec<String>,
    pub is_booked: bool,
    /// Present only while the room is booked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<i64>,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        let details = room.details();
        Self {
            id: room.id().get(),
            hotel_id: room.hotel_id().get(),
            number: details.number().to_owned(),
            description: details.description().to_owned(),
            rooms_number: details.rooms_number(),
            photos: details.photos().to_vec(),
            is_booked: room.booking().is_booked(),
            booked_by: room.booking().booked_by().map(|user| user.get()),
        }
    }
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self::from(&room)
    }
}

pub(crate) fn room_list(rooms: &[Room]) -> Vec<RoomResponse> {
    rooms.iter().map(RoomResponse::from).collect()
}

/// Acknowledgement returned after a room is removed.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDeletedResponse {
    #[schema(example = "Room successfully deleted")]
    pub message: String,
    pub room_id: i64,
    pub hotel_id: i64,
    /// Client whose booking was dropped with the room, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_booking: Option<i64>,
}

impl From<RoomRemoval> for RoomDeletedResponse {
    fn from(removal: RoomRemoval) -> Self {
        Self {
            message: RoomRemoval::MESSAGE.to_owned(),
            room_id: removal.room_id.get(),
            hotel_id: removal.hotel_id.get(),
            released_booking: removal.released_booking.map(|user| user.get()),
        }
    }
}

/// List every room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "All rooms", body = [RoomResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    _actor: Actor,
) -> ApiResult<web::Json<Vec<RoomResponse>>> {
    let rooms = state.rooms_query.list_rooms().await?;
    Ok(web::Json(room_list(&rooms)))
}

/// List the rooms booked by the calling client.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/mine",
    responses(
        (status = 200, description = "Rooms booked by the caller", body = [RoomResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a client", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "listMyRooms"
)]
#[get("/rooms/mine")]
pub async fn list_my_rooms(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<RoomResponse>>> {
    actor.require_role(Role::Client)?;
    let rooms = state.rooms_query.list_my_rooms(actor.id()).await?;
    Ok(web::Json(room_list(&rooms)))
}

/// Fetch one room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = i64, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = RoomResponse),
        (status = 400, description = "Invalid room id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    _actor: Actor,
    path: web::Path<RoomId>,
) -> ApiResult<web::Json<RoomResponse>> {
    let room = state.rooms_query.get_room(path.into_inner()).await?;
    Ok(web::Json(room.into()))
}

/// Add a room to a hotel owned by the calling landlord.
#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/rooms",
    params(("id" = i64, Path, description = "Hotel identifier")),
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Invalid room details", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the hotel", body = ErrorSchema),
        (status = 404, description = "Hotel not found", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "addRoom"
)]
#[post("/hotels/{id}/rooms")]
pub async fn add_room(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<HotelId>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<HttpResponse> {
    actor.require_role(Role::Landlord)?;
    let room = state
        .rooms
        .add_room(AddRoomRequest {
            actor: actor.id(),
            hotel_id: path.into_inner(),
            details: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(RoomResponse::from(room)))
}

/// Replace a room's details; the booking is left untouched.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = i64, Path, description = "Room identifier")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 400, description = "Invalid room details", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the hotel", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<RoomId>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<RoomResponse>> {
    let room = state
        .rooms
        .update_room(UpdateRoomRequest {
            actor: actor.id(),
            room_id: path.into_inner(),
            details: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(room.into()))
}

/// Delete a room, dropping any booking it holds.
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    params(("id" = i64, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room deleted", body = RoomDeletedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the hotel", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema),
        (status = 409, description = "Room changed while deleting", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "deleteRoom"
)]
#[delete("/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<RoomId>,
) -> ApiResult<web::Json<RoomDeletedResponse>> {
    let removal = state.rooms.delete_room(path.into_inner(), actor.id()).await?;
    Ok(web::Json(removal.into()))
}

/// Book a free room for the calling client.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/booking",
    params(("id" = i64, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room booked", body = RoomResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a client", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema),
        (status = 409, description = "Room already booked", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["booking"],
    operation_id = "bookRoom"
)]
#[post("/rooms/{id}/booking")]
pub async fn book_room(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<RoomId>,
) -> ApiResult<web::Json<RoomResponse>> {
    actor.require_role(Role::Client)?;
    let room = state.booking.book_room(path.into_inner(), actor.id()).await?;
    Ok(web::Json(room.into()))
}

/// Release a booking as its client or as the hotel's landlord.
///
/// Releasing a free room is a no-op that returns the room unchanged.
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}/booking",
    params(("id" = i64, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room released", body = RoomResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller may not release this room", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema),
        (status = 409, description = "Room changed while releasing", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["booking"],
    operation_id = "releaseRoom"
)]
#[delete("/rooms/{id}/booking")]
pub async fn release_room(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<RoomId>,
) -> ApiResult<web::Json<RoomResponse>> {
    let room = state
        .booking
        .release_room(path.into_inner(), actor.id())
        .await?;
    Ok(web::Json(room.into()))
}
