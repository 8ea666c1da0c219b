//! Driving port for contact reads.
//!
//! Inbound adapters use this port to look contacts up and to resolve the
//! derived local time of a contact without importing outbound concerns.

use async_trait::async_trait;

use crate::domain::{Contact, Error};

/// Domain use-case port for reading contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactQuery: Send + Sync {
    /// Fetch one contact by its textual identifier.
    ///
    /// # Errors
    ///
    /// A malformed identifier fails with `invalid_request`. An unknown but
    /// well-formed identifier is not an error and yields `None`.
    async fn get_contact(&self, id: &str) -> Result<Option<Contact>, Error>;

    /// Return every contact in the store's natural order.
    async fn list_contacts(&self) -> Result<Vec<Contact>, Error>;

    /// Resolve the current local time for the contact's stored timezone.
    ///
    /// # Errors
    ///
    /// Fails with `missing_credential` when no API key is configured and with
    /// `upstream_unavailable` when the time authority cannot answer.
    async fn contact_time(&self, contact: &Contact) -> Result<String, Error>;
}
