//! Diesel table definitions for the user store.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// User records.
    ///
    /// `id` is the public identifier. `seq` only records insertion order so
    /// that paging is stable across calls.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Insertion sequence, unique and monotonically increasing.
        seq -> Int8,
        name -> Varchar,
        /// Lowercased email, unique across all records.
        email -> Varchar,
        /// Date of birth.
        dob -> Date,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
