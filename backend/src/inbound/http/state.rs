//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and depend only
//! on driving ports, so they stay testable with mocked use-cases.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, HotelRepository, HotelsCommand, HotelsQuery, RoomRepository, RoomsCommand,
    RoomsQuery, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{BookingService, HotelsService, RoomsService, Stores, UsersService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub booking: Arc<dyn BookingCommand>,
    pub rooms: Arc<dyn RoomsCommand>,
    pub rooms_query: Arc<dyn RoomsQuery>,
    pub hotels: Arc<dyn HotelsCommand>,
    pub hotels_query: Arc<dyn HotelsQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub booking: Arc<dyn BookingCommand>,
    pub rooms: Arc<dyn RoomsCommand>,
    pub rooms_query: Arc<dyn RoomsQuery>,
    pub hotels: Arc<dyn HotelsCommand>,
    pub hotels_query: Arc<dyn HotelsQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            booking,
            rooms,
            rooms_query,
            hotels,
            hotels_query,
            users,
            users_command,
        } = ports;
        Self {
            booking,
            rooms,
            rooms_query,
            hotels,
            hotels_query,
            users,
            users_command,
        }
    }

    /// Wire every domain service over one set of stores.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hotel_backend::domain::Stores;
    /// use hotel_backend::inbound::http::state::HttpState;
    /// use hotel_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_stores(Stores::new(store.clone(), store.clone(), store));
    /// let _booking = state.booking.clone();
    /// ```
    pub fn from_stores<U, H, R>(stores: Stores<U, H, R>) -> Self
    where
        U: UserRepository + 'static,
        H: HotelRepository + 'static,
        R: RoomRepository + 'static,
    {
        let rooms = Arc::new(RoomsService::new(stores.clone()));
        let hotels = Arc::new(HotelsService::new(stores.clone()));
        let users = Arc::new(UsersService::new(stores.clone()));
        Self::new(HttpStatePorts {
            booking: Arc::new(BookingService::new(stores)),
            rooms: rooms.clone(),
            rooms_query: rooms,
            hotels: hotels.clone(),
            hotels_query: hotels,
            users: users.clone(),
            users_command: users,
        })
    }
}
