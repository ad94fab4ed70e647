//! HTTP inbound adapter exposing the REST API under `/api/v1`.

use actix_web::{Scope, web};

pub mod error;
pub mod health;
pub mod hotels;
pub mod identity;
pub mod rooms;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Build the `/api/v1` scope with every REST handler registered.
///
/// Literal segments such as `/hotels/mine` are registered before their
/// `{id}` siblings so they are not parsed as identifiers.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(hotels::list_hotels)
        .service(hotels::list_landlord_hotels)
        .service(hotels::get_hotel)
        .service(hotels::add_hotel)
        .service(rooms::add_room)
        .service(rooms::list_rooms)
        .service(rooms::list_my_rooms)
        .service(rooms::get_room)
        .service(rooms::update_room)
        .service(rooms::delete_room)
        .service(rooms::book_room)
        .service(rooms::release_room)
        .service(users::current_user)
        .service(users::change_language)
        .service(users::get_user)
        .service(users::delete_user)
        .service(users::list_users)
}
