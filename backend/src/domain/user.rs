//! User data model.
//!
//! The user record is the only entity the service manages. This module holds
//! the record itself, the raw input shape clients send ([`UserDraft`]), and the
//! construction functions that apply the record's required-field and default
//! rules before anything reaches persistence.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while turning a [`UserDraft`] into a record or a
/// set of changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MissingName,
    MissingEmail,
    MissingDob,
    InvalidDob { value: String },
}

impl UserValidationError {
    /// Name of the offending field as clients send it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingEmail => "email",
            Self::MissingDob | Self::InvalidDob { .. } => "dob",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Name is required"),
            Self::MissingEmail => write!(f, "Email is required"),
            Self::MissingDob => write!(f, "Date of Birth is required"),
            Self::InvalidDob { value } => {
                write!(f, "Date of Birth \"{value}\" is not a valid date")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque user identifier.
///
/// Identifiers are generated as UUID strings on creation, but lookups accept
/// whatever text the client supplied; deciding whether such text can name a
/// record is left to the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap client-supplied identifier text verbatim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Identifier text as supplied.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret the identifier as a UUID, when it is one.
    pub fn to_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-controlled fields of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub is_active: bool,
}

/// Stored user record.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - `name` and `email` are trimmed and non-empty; `email` is lowercase.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a record from stored parts.
    pub fn new(
        id: UserId,
        profile: UserProfile,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile,
            created_at,
            updated_at,
        }
    }

    /// Build a candidate record for insertion from client input.
    ///
    /// Applies the record rules: `name` is trimmed, `email` trimmed and
    /// lowercased, both must be non-empty, `dob` must be present and parse as
    /// a date, and `isActive` defaults to `true`. Both timestamps are set to
    /// `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use user_service::domain::{User, UserDraft, UserId};
    ///
    /// let draft = UserDraft {
    ///     name: Some(" Ada ".into()),
    ///     email: Some(" Ada@Example.COM ".into()),
    ///     dob: Some("1815-12-10".into()),
    ///     is_active: None,
    /// };
    /// let user = User::from_draft(draft, UserId::random(), Utc::now()).expect("valid draft");
    /// assert_eq!(user.profile().email, "ada@example.com");
    /// assert!(user.profile().is_active);
    /// ```
    pub fn from_draft(
        draft: UserDraft,
        id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let UserDraft {
            name,
            email,
            dob,
            is_active,
        } = draft;
        let name = name
            .as_deref()
            .map(normalize_name)
            .ok_or(UserValidationError::MissingName)??;
        let email = email
            .as_deref()
            .map(normalize_email)
            .ok_or(UserValidationError::MissingEmail)??;
        let dob = dob
            .as_deref()
            .map(parse_dob)
            .ok_or(UserValidationError::MissingDob)??;

        Ok(Self::new(
            id,
            UserProfile {
                name,
                email,
                dob,
                is_active: is_active.unwrap_or(true),
            },
            now,
            now,
        ))
    }

    /// Return a copy of the record with `changes` applied.
    pub fn with_changes(&self, changes: &UserChanges) -> Self {
        let mut updated = self.clone();
        if let Some(name) = &changes.name {
            updated.profile.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            updated.profile.email.clone_from(email);
        }
        if let Some(dob) = changes.dob {
            updated.profile.dob = dob;
        }
        if let Some(is_active) = changes.is_active {
            updated.profile.is_active = is_active;
        }
        updated.updated_at = changes.updated_at;
        updated
    }

    /// Stable record identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// User-controlled fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Raw user fields as supplied by a client; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalised field updates for an existing record.
///
/// Absent fields are left untouched; `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl UserChanges {
    /// Build a partial update from whichever fields the draft provides.
    ///
    /// Provided fields obey the same rules as on creation.
    pub fn from_partial_draft(
        draft: UserDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let UserDraft {
            name,
            email,
            dob,
            is_active,
        } = draft;
        Ok(Self {
            name: name.as_deref().map(normalize_name).transpose()?,
            email: email.as_deref().map(normalize_email).transpose()?,
            dob: dob.as_deref().map(parse_dob).transpose()?,
            is_active,
            updated_at: now,
        })
    }
}

/// Returned when a full replacement omits a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteReplacement;

impl fmt::Display for IncompleteReplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replacement is missing a required field")
    }
}

impl std::error::Error for IncompleteReplacement {}

/// A draft that carries every field needed for a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReplacement {
    name: String,
    email: String,
    dob: String,
    is_active: bool,
}

impl UserReplacement {
    /// Presence check for a full replacement.
    ///
    /// `name`, `email`, and `dob` must be present and non-empty. `is_active`
    /// only has to be present: `false` is a valid value.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{UserDraft, UserReplacement};
    ///
    /// let mut draft = UserDraft {
    ///     name: Some("Ada".into()),
    ///     email: Some("ada@example.com".into()),
    ///     dob: Some("1815-12-10".into()),
    ///     is_active: Some(false),
    /// };
    /// assert!(UserReplacement::try_from_draft(draft.clone()).is_ok());
    ///
    /// draft.is_active = None;
    /// assert!(UserReplacement::try_from_draft(draft).is_err());
    /// ```
    pub fn try_from_draft(draft: UserDraft) -> Result<Self, IncompleteReplacement> {
        let UserDraft {
            name,
            email,
            dob,
            is_active,
        } = draft;
        match (
            name.filter(|value| !value.is_empty()),
            email.filter(|value| !value.is_empty()),
            dob.filter(|value| !value.is_empty()),
            is_active,
        ) {
            (Some(name), Some(email), Some(dob), Some(is_active)) => Ok(Self {
                name,
                email,
                dob,
                is_active,
            }),
            _ => Err(IncompleteReplacement),
        }
    }

    /// Normalise the replacement into a set of changes covering every field.
    pub fn into_changes(self, now: DateTime<Utc>) -> Result<UserChanges, UserValidationError> {
        Ok(UserChanges {
            name: Some(normalize_name(&self.name)?),
            email: Some(normalize_email(&self.email)?),
            dob: Some(parse_dob(&self.dob)?),
            is_active: Some(self.is_active),
            updated_at: now,
        })
    }
}

fn normalize_name(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::MissingName);
    }
    Ok(trimmed.to_owned())
}

fn normalize_email(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::MissingEmail);
    }
    Ok(trimmed.to_lowercase())
}

/// Parse a date of birth given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps keep only their calendar date in UTC.
pub fn parse_dob(raw: &str) -> Result<NaiveDate, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::MissingDob);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(trimmed).map(|stamp| stamp.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| UserValidationError::InvalidDob {
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests;
