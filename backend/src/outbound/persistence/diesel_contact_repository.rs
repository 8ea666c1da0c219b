//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! The `contacts_phone_key` unique constraint is the authoritative phone
//! uniqueness guard; violations surface as
//! [`ContactRepositoryError::DuplicatePhone`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, ContactName, ContactPatch, NewContact, PhoneNumber};

use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to contact repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ContactRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Map errors from writes that set `phone`, recognising unique violations.
fn map_phone_write_error(
    error: diesel::result::Error,
    phone: &PhoneNumber,
) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ContactRepositoryError::duplicate_phone(phone.as_str())
        }
        other => map_diesel_error(other),
    }
}

/// Convert a database row to a domain contact.
///
/// Rows violating domain invariants indicate a corrupted store and surface
/// as query errors.
fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let name = ContactName::new(&row.name).map_err(|err| {
        ContactRepositoryError::query(format!("invalid name stored for {}: {err}", row.id))
    })?;
    let phone = PhoneNumber::new(row.phone).map_err(|err| {
        ContactRepositoryError::query(format!("invalid phone stored for {}: {err}", row.id))
    })?;
    Ok(Contact {
        id: ContactId::from_uuid(row.id),
        name,
        phone,
        country: row.country,
        timezone: row.timezone,
    })
}

fn changeset(patch: &ContactPatch) -> ContactChangeset<'_> {
    match patch {
        ContactPatch::Rename { name } => ContactChangeset {
            name: Some(name.as_str()),
            ..ContactChangeset::default()
        },
        ContactPatch::Replace {
            name,
            phone,
            country,
            timezone,
        } => ContactChangeset {
            name: name.as_ref().map(ContactName::as_str),
            phone: Some(phone.as_str()),
            country: Some(country.as_str()),
            timezone: Some(timezone.as_str()),
        },
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(id.as_uuid()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::seq.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn count_by_phone(&self, phone: &PhoneNumber) -> Result<u64, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = contacts::table
            .filter(contacts::phone.eq(phone.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(count)
            .map_err(|_| ContactRepositoryError::query(format!("negative row count {count}")))
    }

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::phone.eq(phone.as_str()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewContactRow {
            id: Uuid::new_v4(),
            name: contact.name.as_str(),
            phone: contact.phone.as_str(),
            country: &contact.country,
            timezone: &contact.timezone,
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_phone_write_error(err, &contact.phone))?;

        row_to_contact(row)
    }

    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::update(contacts::table.filter(contacts::id.eq(id.as_uuid())))
            .set(changeset(patch))
            .returning(ContactRow::as_returning())
            .get_result::<ContactRow>(&mut conn)
            .await
            .optional();

        let row = match (result, patch) {
            (Ok(row), _) => row,
            (Err(err), ContactPatch::Replace { phone, .. }) => {
                return Err(map_phone_write_error(err, phone));
            }
            (Err(err), ContactPatch::Rename { .. }) => return Err(map_diesel_error(err)),
        };

        row.map(row_to_contact).transpose()
    }

    async fn delete(&self, id: &ContactId) -> Result<u64, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(contacts::table.filter(contacts::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed as u64)
    }
}
