//! Port abstraction for user persistence adapters and their errors.
//!
//! The repository is the single persistence collaborator of the service.
//! Adapters own the storage concerns (uniqueness of `email`, natural order,
//! identifier format); the domain only sees records or a port error.
use async_trait::async_trait;

use crate::domain::{User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A write collided with a unique index (e.g. a second record with
        /// the same email).
        DuplicateKey { message: String } => "duplicate key: {message}",
        /// The identifier cannot name any record in this store.
        Cast { id: String } => "Cast to identifier failed for value \"{id}\"",
    }
}

/// Driven port over the user collection.
///
/// Listing follows the store's natural order, which must be stable across
/// calls (insertion order) so that page boundaries do not drift.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new record and return it as persisted.
    async fn insert(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Count every stored record.
    async fn count(&self) -> Result<u64, UserPersistenceError>;

    /// Fetch up to `limit` records after skipping `offset`, in natural order.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Apply `changes` and return the record as it was *before* the update,
    /// or `None` when no record matched.
    async fn update_returning_previous(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Apply `changes` and return the record as it is *after* the update,
    /// or `None` when no record matched.
    async fn update_returning_updated(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;
}
