//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read user records
//! without importing outbound persistence concerns. Production backs it with
//! [`crate::domain::UserService`]; handler tests can substitute a mock.

use async_trait::async_trait;
use pagination::{PageRequest, PaginationInfo};

use crate::domain::{Error, User, UserId};

/// One page of users plus its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub pagination: PaginationInfo,
}

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the requested page of users.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidPage`] when the page
    /// number lies past the last page.
    async fn list_users(&self, request: PageRequest) -> Result<UserPage, Error>;

    /// Return the user with the given identifier.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when nothing matches.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
