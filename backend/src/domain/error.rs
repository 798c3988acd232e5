//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! envelopes. Every error belongs to one of two tiers:
//!
//! - a **rejection** is an expected, named refusal (invalid page number,
//!   missing required fields, unknown identifier);
//! - an **unexpected** failure is everything else (persistence faults,
//!   validation failures, malformed identifiers) and carries the raw failure
//!   object so adapters can echo it.

use pagination::PaginationInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Fixed client-facing message for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
/// Message returned when a requested page lies past the last page.
pub const INVALID_PAGE_MESSAGE: &str = "Invalid page number";
/// Message returned when a full replacement omits a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields (name, email, dob, isActive) are required.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested page number is past the last page.
    InvalidPage,
    /// A full replacement omitted one of the required fields.
    MissingFields,
    /// No record matched the supplied identifier.
    NotFound,
    /// Anything else: persistence faults, validation failures, bad input.
    Internal,
}

/// The two response tiers an [`ErrorCode`] can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Expected, named refusal.
    Rejection,
    /// Uncaught or infrastructure failure.
    Unexpected,
}

impl ErrorCode {
    /// Tier used when rendering this code for clients.
    pub const fn tier(self) -> ErrorTier {
        match self {
            Self::InvalidPage | Self::MissingFields | Self::NotFound => ErrorTier::Rejection,
            Self::Internal => ErrorTier::Unexpected,
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// `details` carries the tier-specific payload: the pagination bookkeeping
/// for [`ErrorCode::InvalidPage`] and the raw failure object for
/// [`ErrorCode::Internal`].
///
/// # Examples
/// ```
/// use user_service::domain::{Error, ErrorCode, ErrorTier};
///
/// let err = Error::not_found("No user found with the given ID: 42");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.code().tier(), ErrorTier::Rejection);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Tier-specific payload for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Rejection for a page number past the last page.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PaginationInfo};
    /// use user_service::domain::Error;
    ///
    /// let info = PaginationInfo::for_total(PageRequest::default(), 0);
    /// let err = Error::invalid_page(info);
    /// assert_eq!(err.message(), "Invalid page number");
    /// assert!(err.details().is_some());
    /// ```
    pub fn invalid_page(pagination: PaginationInfo) -> Self {
        let details = json!({
            "currentPage": pagination.current_page(),
            "totalPages": pagination.total_pages(),
        });
        Self::new(ErrorCode::InvalidPage, INVALID_PAGE_MESSAGE).with_details(details)
    }

    /// Rejection for a full replacement missing a required field.
    pub fn missing_fields() -> Self {
        Self::new(ErrorCode::MissingFields, MISSING_FIELDS_MESSAGE)
    }

    /// Rejection for an identifier with no matching record.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Unexpected failure carrying the raw failure object.
    pub fn internal(error_object: Value) -> Self {
        Self::new(ErrorCode::Internal, INTERNAL_ERROR_MESSAGE).with_details(error_object)
    }

    /// Unexpected failure described by a named error kind and message.
    ///
    /// The resulting failure object has the shape
    /// `{"name": <kind>, "message": <message>, ...extra}`.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use user_service::domain::Error;
    ///
    /// let err = Error::unexpected("CastError", "bad id", [("value", json!("xyz"))]);
    /// assert_eq!(
    ///     err.details(),
    ///     Some(&json!({ "name": "CastError", "message": "bad id", "value": "xyz" }))
    /// );
    /// ```
    pub fn unexpected<'a>(
        name: &str,
        message: impl Into<String>,
        extra: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Self {
        let mut object = Map::new();
        object.insert("name".to_owned(), Value::from(name));
        object.insert("message".to_owned(), Value::from(message.into()));
        for (key, value) in extra {
            object.insert(key.to_owned(), value);
        }
        Self::internal(Value::Object(object))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
