//! Driving port for contact mutations.
//!
//! Requests carry raw caller input; implementations own validation so every
//! inbound adapter gets the same error taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Contact, Error};

/// Request to create a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactRequest {
    /// Person name; must be non-blank.
    pub name: String,
    /// Phone number; must not already be stored.
    pub phone: String,
}

/// Request to change a stored contact.
///
/// At least one of `name` and `phone` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    /// Textual identifier of the contact to change.
    pub id: String,
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
}

/// Driving port for contact mutations.
///
/// # Phone changes
///
/// A phone already held by the same contact skips re-validation. A phone held
/// by another contact fails with `conflict`. Any other phone is validated by
/// the phone authority before the contact's phone, country, and timezone are
/// overwritten together.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Validate and store a new contact.
    ///
    /// # Errors
    ///
    /// - `missing_credential` when no API key is configured.
    /// - `duplicate_value` when the phone is already stored.
    /// - `upstream_unavailable` when the phone authority cannot answer.
    /// - `invalid_request` when the input is blank or the number is rejected.
    async fn add_contact(&self, request: AddContactRequest) -> Result<Contact, Error>;

    /// Apply a partial update and return the persisted contact.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when neither field is supplied or input is malformed.
    /// - `not_found` when the contact does not exist.
    /// - `conflict` when the phone belongs to another contact.
    /// - `missing_credential` / `upstream_unavailable` when re-validation
    ///   cannot run.
    async fn update_contact(&self, request: UpdateContactRequest) -> Result<Contact, Error>;

    /// Delete a contact, returning whether exactly one record was removed.
    ///
    /// Malformed and unknown identifiers answer `false` rather than failing.
    async fn delete_contact(&self, id: &str) -> Result<bool, Error>;
}
