//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Implements the domain's contact repository port against PostgreSQL with
//! async support through `diesel-async` and `bb8` connection pooling.
//!
//! - Repository code only translates between Diesel rows and domain types.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) stay private.
//! - Database errors are mapped to the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use contacts::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/contacts")).await?;
//! let repo = DieselContactRepository::new(pool);
//! ```

mod diesel_contact_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
