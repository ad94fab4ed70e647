//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{
    MockBookingCommand, MockHotelsCommand, MockHotelsQuery, MockRoomsCommand, MockRoomsQuery,
    MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

pub(crate) use crate::domain::test_support::{hotel, room, user};

/// Mocked driving ports; set expectations, then [`StateBuilder::build`].
#[derive(Default)]
pub(crate) struct StateBuilder {
    pub booking: MockBookingCommand,
    pub rooms: MockRoomsCommand,
    pub rooms_query: MockRoomsQuery,
    pub hotels: MockHotelsCommand,
    pub hotels_query: MockHotelsQuery,
    pub users: MockUsersQuery,
    pub users_command: MockUsersCommand,
}

impl StateBuilder {
    pub(crate) fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            booking: Arc::new(self.booking),
            rooms: Arc::new(self.rooms),
            rooms_query: Arc::new(self.rooms_query),
            hotels: Arc::new(self.hotels),
            hotels_query: Arc::new(self.hotels_query),
            users: Arc::new(self.users),
            users_command: Arc::new(self.users_command),
        })
    }

    /// Every request authenticates as the given user.
    pub(crate) fn acting_as(mut self, id: i64, role: crate::domain::Role) -> Self {
        self.users
            .expect_find_user()
            .returning(move |_| Ok(user(id, role)));
        self
    }
}

/// The full `/api/v1` surface over mocked ports.
pub(crate) fn test_app(
    builder: StateBuilder,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(builder.build()))
        .service(api_scope())
}
