//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed contact store using Diesel ORM
//! - **api_ninjas**: reqwest client for the phone and time authorities
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod api_ninjas;
pub mod persistence;
