//! Diesel table definitions for the contact store.
//!
//! Kept in sync with `backend/migrations` by hand; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Contacts table.
    ///
    /// `phone` carries a unique constraint that backs the workflow's
    /// uniqueness check.
    contacts (id) {
        /// Primary key generated by the repository.
        id -> Uuid,
        /// Person name.
        name -> Text,
        /// Phone number as supplied by the caller.
        phone -> Text,
        /// Country reported by the phone authority.
        country -> Text,
        /// First timezone reported by the phone authority.
        timezone -> Text,
        /// Insertion sequence; defines the natural listing order.
        seq -> Int8,
        /// Insertion time.
        created_at -> Timestamptz,
    }
}
