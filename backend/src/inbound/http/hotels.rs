//! Hotels API handlers.
//!
//! ```text
//! GET  /api/v1/hotels
//! GET  /api/v1/hotels/mine
//! GET  /api/v1/hotels/{id}
//! POST /api/v1/hotels
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Hotel, HotelAvailability, HotelDetailsDraft, HotelId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Actor;
use crate::inbound::http::rooms::{RoomResponse, room_list};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Hotel details submitted by a landlord.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    #[schema(example = "Seaside")]
    pub name: String,
    pub description: String,
    #[schema(example = "1 Shore Road")]
    pub address: String,
    #[schema(example = "+10000000000")]
    pub phone_number: String,
    #[serde(default)]
    pub two_gis_url: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl From<HotelRequest> for HotelDetailsDraft {
    fn from(value: HotelRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            address: value.address,
            phone_number: value.phone_number,
            two_gis_url: value.two_gis_url,
            google_maps_url: value.google_maps_url,
            telegram: value.telegram,
            photos: value.photos,
        }
    }
}

/// A hotel without its rooms.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    #[schema(example = 3)]
    pub id: i64,
    #[schema(example = 2)]
    pub landlord_id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_gis_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    pub photos: Vec<String>,
}

impl From<&Hotel> for HotelResponse {
    fn from(hotel: &Hotel) -> Self {
        let details = hotel.details();
        Self {
            id: hotel.id().get(),
            landlord_id: hotel.landlord_id().get(),
            name: details.name().to_owned(),
            description: details.description().to_owned(),
            address: details.address().to_owned(),
            phone_number: details.phone_number().to_owned(),
            two_gis_url: details.two_gis_url().map(str::to_owned),
            google_maps_url: details.google_maps_url().map(str::to_owned),
            telegram: details.telegram().map(str::to_owned),
            photos: details.photos().to_vec(),
        }
    }
}

/// A hotel with its rooms and the number still free.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelAvailabilityResponse {
    #[serde(flatten)]
    pub hotel: HotelResponse,
    #[schema(example = 4)]
    pub available_rooms_count: usize,
    pub rooms: Vec<RoomResponse>,
}

impl From<&HotelAvailability> for HotelAvailabilityResponse {
    fn from(view: &HotelAvailability) -> Self {
        Self {
            hotel: HotelResponse::from(view.hotel()),
            available_rooms_count: view.available_rooms_count(),
            rooms: room_list(view.rooms()),
        }
    }
}

fn availability_list(views: &[HotelAvailability]) -> Vec<HotelAvailabilityResponse> {
    views.iter().map(HotelAvailabilityResponse::from).collect()
}

/// List hotels that have at least one free room.
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    responses(
        (status = 200, description = "Hotels with availability", body = [HotelAvailabilityResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["hotels"],
    operation_id = "listHotels"
)]
#[get("/hotels")]
pub async fn list_hotels(
    state: web::Data<HttpState>,
    _actor: Actor,
) -> ApiResult<web::Json<Vec<HotelAvailabilityResponse>>> {
    let views = state.hotels_query.list_hotels().await?;
    Ok(web::Json(availability_list(&views)))
}

/// List the calling landlord's hotels, including fully booked ones.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/mine",
    responses(
        (status = 200, description = "Hotels owned by the caller", body = [HotelAvailabilityResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a landlord", body = ErrorSchema)
    ),
    tags = ["hotels"],
    operation_id = "listLandlordHotels"
)]
#[get("/hotels/mine")]
pub async fn list_landlord_hotels(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<HotelAvailabilityResponse>>> {
    actor.require_role(Role::Landlord)?;
    let views = state.hotels_query.list_landlord_hotels(actor.id()).await?;
    Ok(web::Json(availability_list(&views)))
}

/// Fetch one hotel with its rooms.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    params(("id" = i64, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Hotel", body = HotelAvailabilityResponse),
        (status = 400, description = "Invalid hotel id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Hotel not found", body = ErrorSchema)
    ),
    tags = ["hotels"],
    operation_id = "getHotel"
)]
#[get("/hotels/{id}")]
pub async fn get_hotel(
    state: web::Data<HttpState>,
    _actor: Actor,
    path: web::Path<HotelId>,
) -> ApiResult<web::Json<HotelAvailabilityResponse>> {
    let view = state.hotels_query.get_hotel(path.into_inner()).await?;
    Ok(web::Json(HotelAvailabilityResponse::from(&view)))
}

/// Register a hotel owned by the calling landlord.
#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    request_body = HotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 400, description = "Invalid hotel details", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a landlord", body = ErrorSchema)
    ),
    tags = ["hotels"],
    operation_id = "addHotel"
)]
#[post("/hotels")]
pub async fn add_hotel(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<HotelRequest>,
) -> ApiResult<HttpResponse> {
    actor.require_role(Role::Landlord)?;
    let hotel = state
        .hotels
        .add_hotel(actor.id(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(HotelResponse::from(&hotel)))
}
