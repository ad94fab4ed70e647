//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Language, NewUser, Role, RoomId, User, UserId};

use super::diesel_helpers::{
    is_foreign_key_violation, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{rooms, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let email =
        Email::new(&row.email).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let language = row
        .language
        .parse::<Language>()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(
        id,
        NewUser::new(email, role)
            .with_names(row.first_name, row.last_name)
            .with_language(language),
    ))
}

/// Rows touched by a user deletion; `None` when the user row was absent.
fn released_rooms(
    released: Vec<i64>,
    deleted: usize,
) -> Result<Option<Vec<RoomId>>, UserPersistenceError> {
    if deleted == 0 {
        return Ok(None);
    }
    released
        .into_iter()
        .map(|id| RoomId::new(id).map_err(|err| UserPersistenceError::query(err.to_string())))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = user.email.to_string();
        let row = NewUserRow {
            email: &email,
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
            role: user.role.as_str(),
            language: user.language.as_str(),
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    UserPersistenceError::duplicate_email(email.clone())
                } else {
                    map_diesel_error(error)
                }
            })?;
        row_to_user(inserted)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn update_language(
        &self,
        id: UserId,
        language: Language,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(users::language.eq(language.as_str()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<Vec<RoomId>>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        // Release and delete together so a failed delete keeps the bookings.
        let (released, deleted) = conn
            .transaction(|conn| {
                async move {
                    let released: Vec<i64> = diesel::update(
                        rooms::table.filter(rooms::booked_by.eq(raw_id)),
                    )
                    .set((
                        rooms::booked_by.eq(None::<i64>),
                        rooms::revision.eq(rooms::revision + 1),
                        rooms::updated_at.eq(Utc::now()),
                    ))
                    .returning(rooms::id)
                    .get_results(conn)
                    .await?;
                    let deleted = diesel::delete(users::table.find(raw_id))
                        .execute(conn)
                        .await?;
                    Ok((released, deleted))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error: diesel::result::Error| {
                if is_foreign_key_violation(&error) {
                    UserPersistenceError::owns_hotels(raw_id)
                } else {
                    map_diesel_error(error)
                }
            })?;

        debug!(user_id = %id, released = released.len(), deleted, "user delete executed");
        released_rooms(released, deleted)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; queries are exercised against PostgreSQL.
    use super::*;
    use rstest::rstest;

    fn row(id: i64, email: &str, role: &str) -> UserRow {
        UserRow {
            id,
            email: email.to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
            role: role.to_owned(),
            language: "EN".to_owned(),
        }
    }

    #[rstest]
    fn converts_valid_rows() {
        let user = row_to_user(row(3, "ada@example.com", "LANDLORD")).expect("valid row");
        assert_eq!(user.id().get(), 3);
        assert_eq!(user.role(), Role::Landlord);
        assert_eq!(user.first_name(), Some("Ada"));
        assert_eq!(user.language(), Language::En);
    }

    #[rstest]
    fn unknown_stored_language_is_a_query_error() {
        let mut corrupt = row(4, "ada@example.com", "CLIENT");
        corrupt.language = "DE".to_owned();
        let error = row_to_user(corrupt).expect_err("corrupt language");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn missing_user_deletes_nothing() {
        assert_eq!(released_rooms(Vec::new(), 0), Ok(None));
    }

    #[rstest]
    fn released_room_ids_are_reported() {
        let released = released_rooms(vec![5, 9], 1)
            .expect("valid ids")
            .expect("user deleted");
        let raw: Vec<i64> = released.into_iter().map(i64::from).collect();
        assert_eq!(raw, vec![5, 9]);
    }

    #[rstest]
    #[case(row(0, "ada@example.com", "CLIENT"))]
    #[case(row(1, "not-an-email", "CLIENT"))]
    #[case(row(1, "ada@example.com", "OWNER"))]
    fn corrupt_rows_are_query_errors(#[case] corrupt: UserRow) {
        let error = row_to_user(corrupt).expect_err("corrupt row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(error, UserPersistenceError::Connection { .. }));
    }
}
