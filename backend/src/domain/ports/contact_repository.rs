//! Port for contact persistence.
//!
//! The [`ContactRepository`] trait is the only way the workflow touches the
//! contact store. Adapters own identifier assignment and should enforce phone
//! uniqueness natively, reporting violations as
//! [`ContactRepositoryError::DuplicatePhone`].

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, ContactPatch, NewContact, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// A write collided with the store's phone uniqueness guard.
        DuplicatePhone { phone: String } =>
            "phone {phone} is already stored",
    }
}

/// Port for contact storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch one contact by identifier.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Fetch every stored contact in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Count contacts holding exactly this phone number.
    async fn count_by_phone(&self, phone: &PhoneNumber) -> Result<u64, ContactRepositoryError>;

    /// Fetch the contact holding exactly this phone number, if any.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Persist a new contact and return it with its assigned identifier.
    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError>;

    /// Apply `patch` to the contact and return the persisted result.
    ///
    /// Returns `None` when no contact has this identifier.
    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Remove the contact, returning how many records were deleted.
    async fn delete(&self, id: &ContactId) -> Result<u64, ContactRepositoryError>;
}
