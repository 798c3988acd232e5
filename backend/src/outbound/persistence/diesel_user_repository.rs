//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Records are listed in `seq` order, i.e. the order they were inserted.
//! Identifiers that are not UUIDs cannot name a row; they are reported as
//! [`UserPersistenceError::Cast`] rather than as "no match".

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserChanges, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Read the current row under a row lock, apply the update and return
    /// the locked snapshot.
    async fn lock_and_update(
        conn: &mut AsyncPgConnection,
        id: Uuid,
        update: &UserUpdate<'_>,
    ) -> Result<Option<User>, UserPersistenceError> {
        conn.transaction(|conn| {
            async move {
                let current: Option<UserRow> = users::table
                    .find(id)
                    .select(UserRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if current.is_some() {
                    diesel::update(users::table.find(id))
                        .set(update)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(current)
            }
            .scope_boxed()
        })
        .await
        .map(|row| row.map(User::from))
        .map_err(map_diesel_error)
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

/// Map Diesel errors to user persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::duplicate_key(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message()),
        other => UserPersistenceError::query(other.to_string()),
    }
}

fn parse_id(id: &UserId) -> Result<Uuid, UserPersistenceError> {
    id.to_uuid()
        .ok_or_else(|| UserPersistenceError::cast(id.as_str()))
}

/// Clamp a page bound to the range PostgreSQL accepts.
fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<User, UserPersistenceError> {
        let id = parse_id(user.id())?;
        let profile = user.profile();
        let row = NewUserRow {
            id,
            name: &profile.name,
            email: &profile.email,
            dob: profile.dob,
            is_active: profile.is_active,
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(User::from)
            .map_err(map_diesel_error)
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::seq.asc())
            .offset(to_sql_bound(offset))
            .limit(to_sql_bound(limit))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn update_returning_previous(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let id = parse_id(id)?;
        let update = UserUpdate::from(changes);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        Self::lock_and_update(&mut conn, id, &update).await
    }

    async fn update_returning_updated(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let id = parse_id(id)?;
        let update = UserUpdate::from(changes);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(id))
            .set(&update)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the mapping helpers; queries run against a live
    //! database only.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct FakeInfo(&'static str);

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(FakeInfo(message)))
    }

    #[rstest]
    fn unique_violations_become_duplicate_keys() {
        let error = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
        ));
        assert_eq!(error.kind(), "DuplicateKeyError");
        assert!(error.to_string().contains("users_email_key"));
    }

    #[rstest]
    fn closed_connections_become_connection_errors() {
        let error = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, "gone"));
        assert_eq!(
            error,
            UserPersistenceError::connection("database connection error")
        );
    }

    #[rstest]
    fn other_failures_become_query_errors() {
        let error = map_diesel_error(DieselError::RollbackTransaction);
        assert_eq!(error.kind(), "QueryError");
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("65f1c0ffee")]
    fn malformed_ids_are_cast_failures(#[case] raw: &str) {
        let error = parse_id(&UserId::new(raw)).expect_err("not a uuid");
        assert_eq!(error, UserPersistenceError::cast(raw));
    }

    #[rstest]
    fn uuid_ids_parse() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&UserId::from(id)).expect("uuid"), id);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(25, 25)]
    #[case(u64::MAX, i64::MAX)]
    fn page_bounds_are_clamped(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bound(value), expected);
    }
}
