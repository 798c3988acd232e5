//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Snapshots around a full replacement.
///
/// `after` is read in a second call once the update has been applied, so it
/// may reflect a concurrent writer's change as well; it is `None` if the
/// record vanished in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedUser {
    pub before: User,
    pub after: Option<User>,
}

/// Domain use-case port for creating and updating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from client input.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace every user-controlled field of an existing user.
    ///
    /// Fails with [`crate::domain::ErrorCode::MissingFields`] when the draft
    /// is incomplete and [`crate::domain::ErrorCode::NotFound`] when nothing
    /// matches `id`.
    async fn replace_user(&self, id: &UserId, draft: UserDraft) -> Result<ReplacedUser, Error>;

    /// Update whichever fields the draft provides and return the result.
    async fn patch_user(&self, id: &UserId, draft: UserDraft) -> Result<User, Error>;
}
