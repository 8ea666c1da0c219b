//! Internal Diesel row structs for the contacts table.
//!
//! These types never leave the persistence layer; the repository converts
//! them into domain contacts at the boundary.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::contacts;

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub country: String,
    pub timezone: String,
}

/// Insertable struct for new contacts; the database assigns `seq`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub phone: &'a str,
    pub country: &'a str,
    pub timezone: &'a str,
}

/// Changeset for contact updates.
///
/// `None` fields are skipped, so a rename leaves the phone columns alone.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactChangeset<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub country: Option<&'a str>,
    pub timezone: Option<&'a str>,
}
