//! Internal Diesel row structs for the users table.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{User, UserChanges, UserId, UserProfile};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::new(
            UserId::from(row.id),
            UserProfile {
                name: row.name,
                email: row.email,
                dob: row.dob,
                is_active: row.is_active,
            },
            row.created_at,
            row.updated_at,
        )
    }
}

/// Insertable struct for creating user records; `seq` is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub dob: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for updating an existing record; `None` leaves a column as is.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub dob: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a UserChanges> for UserUpdate<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            email: changes.email.as_deref(),
            dob: changes.dob,
            is_active: changes.is_active,
            updated_at: changes.updated_at,
        }
    }
}
