//! Diesel table definitions.
//!
//! Keep in step with `backend/migrations`; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Named series of readings.
    series (id) {
        /// Primary key (UUID v4).
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Display colour hint.
        color -> Text,
        /// Declared lower bound; informational only.
        min_value -> Float8,
        /// Declared upper bound; informational only.
        max_value -> Float8,
        /// Author, `system` when none was supplied.
        created_by -> Text,
        /// Insert time.
        created_at -> Timestamptz,
        /// Last write time.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Readings, each owned by one series.
    measurements (id) {
        /// Primary key (UUID v4).
        id -> Uuid,
        /// Owning series; `ON DELETE RESTRICT`.
        series_id -> Uuid,
        /// Reading.
        value -> Float8,
        /// Caller-supplied instant of the reading.
        timestamp -> Timestamptz,
        /// Author, `system` when none was supplied.
        created_by -> Text,
        /// Insert time.
        created_at -> Timestamptz,
        /// Last write time.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accounts; `username` carries a unique index.
    users (id) {
        /// Primary key (UUID v4).
        id -> Uuid,
        /// Unique login name.
        username -> Text,
        /// Credential, stored as supplied.
        password -> Text,
        /// Role tag.
        role -> Text,
        /// Insert time.
        created_at -> Timestamptz,
        /// Last write time.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(measurements -> series (series_id));
diesel::allow_tables_to_appear_in_same_query!(series, measurements, users);
