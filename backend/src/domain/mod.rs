//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the service that carries out the user use cases.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - ErrorCode / ErrorTier: stable error identifier and its response tier.
//! - User (alias to `user::User`): the stored user record.
//! - UserDraft / UserChanges / UserReplacement: input and update shapes.
//! - UserService: implementation of the `UsersQuery` and `UsersCommand`
//!   driving ports.

pub mod error;
pub mod ports;
pub mod user;
mod user_service;

pub use self::error::{
    Error, ErrorCode, ErrorTier, ErrorValidationError, INTERNAL_ERROR_MESSAGE,
    INVALID_PAGE_MESSAGE, MISSING_FIELDS_MESSAGE,
};
pub use self::user::{
    IncompleteReplacement, User, UserChanges, UserDraft, UserId, UserProfile, UserReplacement,
    UserValidationError, parse_dob,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_service::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("No user found with the given ID: 42"))
/// }
/// # assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
