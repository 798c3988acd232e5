//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror the JSON shape of their domain counterparts and are
//! referenced from envelope fields via `#[schema(value_type = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Opaque identifier assigned on creation.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Trimmed, lowercased and unique across users.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Date of birth.
    #[schema(format = Date, example = "1815-12-10")]
    dob: String,
    is_active: bool,
    #[schema(format = DateTime, example = "2024-03-01T12:00:00Z")]
    created_at: String,
    #[schema(format = DateTime, example = "2024-03-01T12:00:00Z")]
    updated_at: String,
}

/// OpenAPI schema for [`pagination::PaginationInfo`].
#[derive(ToSchema)]
#[schema(as = PaginationInfo)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginationInfoSchema {
    /// Requested page number, 1-based.
    #[schema(example = 1)]
    current_page: u64,
    /// `ceil(total / limit)`; zero for an empty collection.
    #[schema(example = 3)]
    total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn user_schema_uses_wire_field_names() {
        assert_eq!(UserSchema::name(), "User");
        let schema_json = schema_to_json::<UserSchema>();
        for field in ["isActive", "createdAt", "updatedAt", "dob"] {
            assert!(schema_json.contains(field), "schema should contain {field}");
        }
    }

    #[test]
    fn pagination_schema_uses_wire_field_names() {
        assert_eq!(PaginationInfoSchema::name(), "PaginationInfo");
        let schema_json = schema_to_json::<PaginationInfoSchema>();
        assert!(schema_json.contains("currentPage"));
        assert!(schema_json.contains("totalPages"));
    }
}
