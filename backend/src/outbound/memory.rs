//! Process-local `UserRepository` implementation.
//!
//! Used when no database is configured and by the HTTP contract tests. It
//! mirrors the PostgreSQL adapter's observable behaviour: records keep
//! insertion order, `email` is unique, and identifiers that are not UUIDs
//! are cast failures rather than misses.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserChanges, UserId};

/// In-memory user store guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create a store pre-populated with `users`, in the given order.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .read()
            .map_err(|_| UserPersistenceError::connection("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .write()
            .map_err(|_| UserPersistenceError::connection("in-memory store lock poisoned"))
    }

    /// Apply `changes` to the record named `id` and return (before, after).
    fn apply(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<(User, User)>, UserPersistenceError> {
        let uuid = check_id(id)?;
        let mut users = self.write()?;
        let Some(index) = users.iter().position(|user| has_uuid(user, uuid)) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            ensure_unique_email(&users, email, Some(uuid))?;
        }
        let Some(slot) = users.get_mut(index) else {
            return Ok(None);
        };
        let before = slot.clone();
        let after = before.with_changes(changes);
        *slot = after.clone();
        Ok(Some((before, after)))
    }
}

/// Parse `id` the way the database's `uuid` column would, so any spelling
/// of a stored identifier addresses the same record.
fn check_id(id: &UserId) -> Result<Uuid, UserPersistenceError> {
    id.to_uuid().ok_or_else(|| UserPersistenceError::cast(id.as_str()))
}

fn has_uuid(user: &User, uuid: Uuid) -> bool {
    user.id().to_uuid() == Some(uuid)
}

fn ensure_unique_email(
    users: &[User],
    email: &str,
    except: Option<Uuid>,
) -> Result<(), UserPersistenceError> {
    let taken = users.iter().any(|user| {
        user.profile().email == email && except.is_none_or(|uuid| !has_uuid(user, uuid))
    });
    if taken {
        return Err(UserPersistenceError::duplicate_key(format!(
            "email \"{email}\" already exists"
        )));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<User, UserPersistenceError> {
        let uuid = check_id(user.id())?;
        let mut users = self.write()?;
        if users.iter().any(|existing| has_uuid(existing, uuid)) {
            return Err(UserPersistenceError::duplicate_key(format!(
                "id \"{}\" already exists",
                user.id()
            )));
        }
        ensure_unique_email(&users, &user.profile().email, None)?;
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let users = self.read()?;
        Ok(u64::try_from(users.len()).unwrap_or(u64::MAX))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.read()?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(users.iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let uuid = check_id(id)?;
        let users = self.read()?;
        Ok(users.iter().find(|user| has_uuid(user, uuid)).cloned())
    }

    async fn update_returning_previous(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.apply(id, changes)?.map(|(before, _)| before))
    }

    async fn update_returning_updated(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.apply(id, changes)?.map(|(_, after)| after))
    }
}
