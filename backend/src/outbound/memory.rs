//! In-process store implementing every repository port.
//!
//! Used by integration tests and by the server when no database URL is
//! configured. All three repositories share one mutex-guarded state so the
//! revision check and the write of a guarded mutation happen atomically, the
//! same guarantee the PostgreSQL adapter gets from a single conditional
//! statement.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    HotelRepository, HotelRepositoryError, RoomRepository, RoomRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Hotel, HotelId, Language, NewHotel, NewRoom, NewUser, Room, RoomBooking, RoomDetails, RoomId,
    User, UserId,
};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, User>,
    hotels: BTreeMap<HotelId, Hotel>,
    rooms: BTreeMap<RoomId, Room>,
}

impl State {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory store; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

const POISONED: &str = "in-memory store lock poisoned";
const EXHAUSTED: &str = "identifier space exhausted";

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))?;
        if state.users.values().any(|stored| stored.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.to_string()));
        }
        let raw = state.allocate();
        let id = UserId::new(raw).map_err(|_| UserPersistenceError::query(EXHAUSTED))?;
        let created = User::new(id, user.clone());
        state.users.insert(id, created.clone());
        debug!(user_id = %id, "user inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))?;
        Ok(state.users.values().cloned().collect())
    }

    async fn update_language(
        &self,
        id: UserId,
        language: Language,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))?;
        let Some(stored) = state.users.remove(&id) else {
            return Ok(None);
        };
        let updated = stored.with_language(language);
        state.users.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<Option<Vec<RoomId>>, UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))?;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        if state.hotels.values().any(|hotel| hotel.is_owned_by(id)) {
            return Err(UserPersistenceError::owns_hotels(id.get()));
        }

        let mut released = Vec::new();
        for room in state.rooms.values_mut() {
            if room.booking().booked_by() == Some(id) {
                *room = Room::new(
                    room.id(),
                    room.hotel_id(),
                    room.details().clone(),
                    RoomBooking::Free,
                    room.revision() + 1,
                );
                released.push(room.id());
            }
        }
        state.users.remove(&id);
        debug!(user_id = %id, released = released.len(), "user deleted");
        Ok(Some(released))
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, HotelRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| HotelRepositoryError::connection(POISONED))?;
        if !state.users.contains_key(&hotel.landlord_id) {
            return Err(HotelRepositoryError::landlord_not_found(
                hotel.landlord_id.get(),
            ));
        }
        let raw = state.allocate();
        let id = HotelId::new(raw).map_err(|_| HotelRepositoryError::query(EXHAUSTED))?;
        let created = Hotel::new(id, hotel.landlord_id, hotel.details.clone());
        state.hotels.insert(id, created.clone());
        debug!(hotel_id = %id, "hotel inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, HotelRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| HotelRepositoryError::connection(POISONED))?;
        Ok(state.hotels.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| HotelRepositoryError::connection(POISONED))?;
        Ok(state.hotels.values().cloned().collect())
    }

    async fn list_by_landlord(&self, landlord: UserId) -> Result<Vec<Hotel>, HotelRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| HotelRepositoryError::connection(POISONED))?;
        Ok(state
            .hotels
            .values()
            .filter(|hotel| hotel.is_owned_by(landlord))
            .cloned()
            .collect())
    }
}

fn rooms_matching(state: &State, keep: impl Fn(&Room) -> bool) -> Vec<Room> {
    state.rooms.values().filter(|room| keep(room)).cloned().collect()
}

/// Check the stored revision of a guarded write target.
fn guard(state: &State, id: RoomId, expected: u32) -> Result<&Room, RoomRepositoryError> {
    let stored = state
        .rooms
        .get(&id)
        .ok_or_else(|| RoomRepositoryError::room_not_found(id.get()))?;
    if stored.revision() != expected {
        return Err(RoomRepositoryError::revision_mismatch(
            expected,
            stored.revision(),
        ));
    }
    Ok(stored)
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn insert(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        if !state.hotels.contains_key(&room.hotel_id) {
            return Err(RoomRepositoryError::hotel_not_found(room.hotel_id.get()));
        }
        let raw = state.allocate();
        let id = RoomId::new(raw).map_err(|_| RoomRepositoryError::query(EXHAUSTED))?;
        let created = Room::new(
            id,
            room.hotel_id,
            room.details.clone(),
            RoomBooking::Free,
            Room::INITIAL_REVISION,
        );
        state.rooms.insert(id, created.clone());
        debug!(room_id = %id, hotel_id = %room.hotel_id, "room inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        Ok(state.rooms.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Room>, RoomRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        Ok(rooms_matching(&state, |_| true))
    }

    async fn list_by_hotel(&self, hotel: HotelId) -> Result<Vec<Room>, RoomRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        Ok(rooms_matching(&state, |room| room.hotel_id() == hotel))
    }

    async fn list_booked_by(&self, user: UserId) -> Result<Vec<Room>, RoomRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        Ok(rooms_matching(&state, |room| {
            room.booking().booked_by() == Some(user)
        }))
    }

    async fn update_details(
        &self,
        id: RoomId,
        details: &RoomDetails,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        let Some(stored) = state.rooms.get_mut(&id) else {
            return Ok(None);
        };
        *stored = Room::new(
            stored.id(),
            stored.hotel_id(),
            details.clone(),
            stored.booking(),
            stored.revision(),
        );
        Ok(Some(stored.clone()))
    }

    async fn save_booking(
        &self,
        id: RoomId,
        booking: RoomBooking,
        expected_revision: u32,
    ) -> Result<Room, RoomRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        let stored = guard(&state, id, expected_revision)?;
        let saved = Room::new(
            stored.id(),
            stored.hotel_id(),
            stored.details().clone(),
            booking,
            expected_revision + 1,
        );
        state.rooms.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: RoomId, expected_revision: u32) -> Result<(), RoomRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| RoomRepositoryError::connection(POISONED))?;
        guard(&state, id, expected_revision)?;
        state.rooms.remove(&id);
        Ok(())
    }
}
