//! OpenAPI documentation for the booking API.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response DTOs, and the [`ErrorSchema`] family describing
//! domain types. Requests authenticate with the `X-Authenticated-User`
//! header forwarded by the gateway.
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::hotels::{HotelAvailabilityResponse, HotelRequest, HotelResponse};
use crate::inbound::http::identity::AUTHENTICATED_USER_HEADER;
use crate::inbound::http::rooms::{RoomDeletedResponse, RoomRequest, RoomResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, LanguageSchema, RoleSchema};
use crate::inbound::http::users::{
    LanguageRequest, ProfileResponse, UserDeletedResponse, UserResponse,
};

/// Name of the header-based security scheme.
pub const SECURITY_SCHEME: &str = "AuthenticatedUser";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTHENTICATED_USER_HEADER,
                "Numeric id of the user authenticated by the gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hotel booking API",
        description = "Hotels, rooms, and the booking lifecycle for clients and landlords."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AuthenticatedUser" = [])),
    paths(
        crate::inbound::http::hotels::list_hotels,
        crate::inbound::http::hotels::list_landlord_hotels,
        crate::inbound::http::hotels::get_hotel,
        crate::inbound::http::hotels::add_hotel,
        crate::inbound::http::rooms::add_room,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::rooms::list_my_rooms,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::delete_room,
        crate::inbound::http::rooms::book_room,
        crate::inbound::http::rooms::release_room,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::change_language,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        LanguageSchema,
        HotelRequest,
        HotelResponse,
        HotelAvailabilityResponse,
        RoomRequest,
        RoomResponse,
        RoomDeletedResponse,
        UserResponse,
        LanguageRequest,
        UserDeletedResponse,
        ProfileResponse,
        ProbeStatus,
    )),
    tags(
        (name = "hotels", description = "Hotels and their availability"),
        (name = "rooms", description = "Room management by landlords"),
        (name = "booking", description = "Booking and releasing rooms"),
        (name = "users", description = "User profiles and administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "traceId")]
    #[case("RoomRequest", "roomsNumber")]
    #[case("RoomDeletedResponse", "message")]
    #[case("UserDeletedResponse", "releasedRooms")]
    #[case("HotelRequest", "phoneNumber")]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/rooms/{id}/booking")]
    #[case("/api/v1/hotels/{id}/rooms")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/users/me/language")]
    #[case("/health/ready")]
    fn documents_path(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }

    #[rstest]
    fn registers_header_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key(SECURITY_SCHEME));
    }
}
