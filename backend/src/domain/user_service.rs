//! User domain service implementing the query and command driving ports.
//!
//! Every operation is a short pipeline of at most two repository calls. The
//! service owns the branching decisions: the pagination bounds check, the
//! required-field check for full replacements and the update-result check.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, PaginationInfo};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{
    ReplacedUser, UserPage, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    Error, User, UserChanges, UserDraft, UserId, UserReplacement, UserValidationError,
};

/// Name reported for rejected field values in the failure object.
const VALIDATION_ERROR_NAME: &str = "ValidationError";

/// User service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository and clock.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use user_service::domain::UserService;
    /// use user_service::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = UserService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn not_found_by_id(id: &UserId) -> Error {
    Error::not_found(format!("No user found with the given ID: {id}"))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    debug!(kind = error.kind(), %error, "user repository call failed");
    let extra = match &error {
        UserPersistenceError::Cast { id } => Some(("value", Value::from(id.as_str()))),
        _ => None,
    };
    Error::unexpected(error.kind(), error.to_string(), extra)
}

fn map_validation_error(error: UserValidationError) -> Error {
    Error::unexpected(
        VALIDATION_ERROR_NAME,
        error.to_string(),
        [("field", Value::from(error.field()))],
    )
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, request: PageRequest) -> Result<UserPage, Error> {
        let total = self.repo.count().await.map_err(map_persistence_error)?;
        let pagination = PaginationInfo::for_total(request, total);
        if pagination.is_out_of_range() {
            return Err(Error::invalid_page(pagination));
        }

        let users = self
            .repo
            .list(request.offset(), request.limit())
            .await
            .map_err(map_persistence_error)?;
        Ok(UserPage { users, pagination })
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found_by_id(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = User::from_draft(draft, UserId::random(), self.clock.utc())
            .map_err(map_validation_error)?;
        self.repo.insert(&user).await.map_err(map_persistence_error)
    }

    async fn replace_user(&self, id: &UserId, draft: UserDraft) -> Result<ReplacedUser, Error> {
        let replacement =
            UserReplacement::try_from_draft(draft).map_err(|_| Error::missing_fields())?;
        let changes = replacement
            .into_changes(self.clock.utc())
            .map_err(map_validation_error)?;

        let before = self
            .repo
            .update_returning_previous(id, &changes)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no user found with given id {id}")))?;

        // Separate read: may observe a concurrent writer's change.
        let after = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        Ok(ReplacedUser { before, after })
    }

    async fn patch_user(&self, id: &UserId, draft: UserDraft) -> Result<User, Error> {
        let changes = UserChanges::from_partial_draft(draft, self.clock.utc())
            .map_err(map_validation_error)?;
        self.repo
            .update_returning_updated(id, &changes)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found_by_id(id))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
