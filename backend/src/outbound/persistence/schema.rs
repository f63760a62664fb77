//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! Diesel uses them for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// Argon2id digest of the account password (PHC string).
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts; `user_id` references the owning account.
    blogs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning account (foreign key to `users.id`).
        user_id -> Uuid,
        /// Blog title.
        title -> Varchar,
        /// Optional author attribution.
        author -> Nullable<Varchar>,
        /// Blog link.
        url -> Varchar,
        /// Number of likes.
        likes -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(blogs, users);
