//! Contact workflow service.
//!
//! This module implements the contact driving ports. Every write is guarded
//! by the phone uniqueness check and, when the phone is new, by a round trip
//! to the phone authority before anything reaches the store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    AddContactRequest, AuthorityError, ContactCommand, ContactQuery, ContactRepository,
    ContactRepositoryError, PhoneAuthority, TimeAuthority, UpdateContactRequest,
};
use crate::domain::{
    ApiCredential, AuthoritySettings, Contact, ContactId, ContactName, ContactPatch,
    ContactValidationError, Error, NewContact, PhoneNumber,
};

/// Country and timezone derived from an accepted phone validation.
#[derive(Debug)]
struct ValidatedPhone {
    country: String,
    timezone: String,
}

/// Contact service implementing the driving ports.
#[derive(Clone)]
pub struct ContactService<R, P, T> {
    repository: Arc<R>,
    phone_authority: Arc<P>,
    time_authority: Arc<T>,
    settings: AuthoritySettings,
}

impl<R, P, T> ContactService<R, P, T> {
    /// Create a new service over the given store and authorities.
    pub fn new(
        repository: Arc<R>,
        phone_authority: Arc<P>,
        time_authority: Arc<T>,
        settings: AuthoritySettings,
    ) -> Self {
        Self {
            repository,
            phone_authority,
            time_authority,
            settings,
        }
    }
}

impl<R, P, T> ContactService<R, P, T>
where
    R: ContactRepository,
    P: PhoneAuthority,
    T: TimeAuthority,
{
    fn map_repository_error(error: ContactRepositoryError) -> Error {
        match error {
            ContactRepositoryError::Connection { message } => {
                Error::internal(format!("contact repository unavailable: {message}"))
            }
            ContactRepositoryError::Query { message } => {
                Error::internal(format!("contact repository error: {message}"))
            }
            ContactRepositoryError::DuplicatePhone { .. } => {
                Error::duplicate_value("phone already exists")
            }
        }
    }

    fn map_authority_error(error: AuthorityError) -> Error {
        warn!(error = %error, "external authority call failed");
        let status = match &error {
            AuthorityError::Status { status, .. } => Some(*status),
            AuthorityError::Transport { .. } | AuthorityError::Decode { .. } => None,
        };
        let err = Error::upstream_unavailable("external authority unavailable");
        match status {
            Some(status) => err.with_details(json!({ "upstreamStatus": status })),
            None => err,
        }
    }

    fn invalid_input(error: ContactValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": error.field(),
            "code": "invalid_contact_field",
        }))
    }

    fn require_credential(&self) -> Result<&ApiCredential, Error> {
        self.settings
            .credential
            .as_ref()
            .ok_or_else(|| Error::missing_credential("no API credential is configured"))
    }

    async fn validate_phone(
        &self,
        credential: &ApiCredential,
        phone: &PhoneNumber,
    ) -> Result<ValidatedPhone, Error> {
        let validation = self
            .phone_authority
            .validate(credential, phone)
            .await
            .map_err(Self::map_authority_error)?;

        let policy = self.settings.validity_policy;
        if !policy.admits(validation.is_valid) {
            debug!(
                is_valid = validation.is_valid,
                policy = %policy,
                "phone authority verdict rejected"
            );
            return Err(Error::invalid_request("phone number is not valid")
                .with_details(json!({ "field": "phone", "code": "phone_not_valid" })));
        }

        let Some(timezone) = validation.timezones.into_iter().next() else {
            debug!(country = %validation.country, "phone authority returned no timezone");
            return Err(Error::invalid_request("phone number has no known timezone")
                .with_details(json!({ "field": "phone", "code": "phone_without_timezone" })));
        };

        Ok(ValidatedPhone {
            country: validation.country,
            timezone,
        })
    }

    async fn find_contact(&self, id: &ContactId) -> Result<Option<Contact>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn apply_patch(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact, Error> {
        match self.repository.update(id, patch).await {
            Ok(Some(contact)) => Ok(contact),
            Ok(None) => Err(Self::contact_not_found(id)),
            Err(ContactRepositoryError::DuplicatePhone { phone }) => {
                debug!(contact_id = %id, "store rejected phone already held elsewhere");
                Err(Self::phone_taken(&phone))
            }
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }

    fn contact_not_found(id: &ContactId) -> Error {
        Error::not_found(format!("contact {id} not found"))
            .with_details(json!({ "id": id.to_string() }))
    }

    fn phone_taken(phone: &str) -> Error {
        Error::conflict("phone already taken").with_details(json!({ "phone": phone }))
    }

    async fn update_with_phone(
        &self,
        id: &ContactId,
        name: Option<ContactName>,
        phone: PhoneNumber,
    ) -> Result<Contact, Error> {
        let holder = self
            .repository
            .find_by_phone(&phone)
            .await
            .map_err(Self::map_repository_error)?;

        if let Some(holder) = holder {
            if holder.id != *id {
                debug!(contact_id = %id, holder_id = %holder.id, "phone held by another contact");
                return Err(Self::phone_taken(phone.as_str()));
            }
            // Same contact already holds this phone: no re-validation needed.
            return match name {
                Some(name) => self.apply_patch(id, &ContactPatch::Rename { name }).await,
                None => self
                    .find_contact(id)
                    .await?
                    .ok_or_else(|| Self::contact_not_found(id)),
            };
        }

        let credential = self.require_credential()?;
        let validated = self.validate_phone(credential, &phone).await?;
        let patch = ContactPatch::Replace {
            name,
            phone,
            country: validated.country,
            timezone: validated.timezone,
        };
        self.apply_patch(id, &patch).await
    }
}

#[async_trait]
impl<R, P, T> ContactQuery for ContactService<R, P, T>
where
    R: ContactRepository,
    P: PhoneAuthority,
    T: TimeAuthority,
{
    async fn get_contact(&self, id: &str) -> Result<Option<Contact>, Error> {
        let id = ContactId::parse(id).map_err(Self::invalid_input)?;
        self.find_contact(&id).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn contact_time(&self, contact: &Contact) -> Result<String, Error> {
        let credential = self.require_credential()?;
        self.time_authority
            .current_time(credential, &contact.timezone)
            .await
            .map_err(Self::map_authority_error)
    }
}

#[async_trait]
impl<R, P, T> ContactCommand for ContactService<R, P, T>
where
    R: ContactRepository,
    P: PhoneAuthority,
    T: TimeAuthority,
{
    async fn add_contact(&self, request: AddContactRequest) -> Result<Contact, Error> {
        let credential = self.require_credential()?;
        let name = ContactName::new(&request.name).map_err(Self::invalid_input)?;
        let phone = PhoneNumber::new(request.phone).map_err(Self::invalid_input)?;

        let existing = self
            .repository
            .count_by_phone(&phone)
            .await
            .map_err(Self::map_repository_error)?;
        if existing > 0 {
            debug!(existing, "rejected duplicate phone on add");
            return Err(Error::duplicate_value("phone already exists")
                .with_details(json!({ "phone": phone.as_str() })));
        }

        let validated = self.validate_phone(credential, &phone).await?;
        let record = NewContact {
            name,
            phone,
            country: validated.country,
            timezone: validated.timezone,
        };
        let contact = self
            .repository
            .insert(&record)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(contact_id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn update_contact(&self, request: UpdateContactRequest) -> Result<Contact, Error> {
        let UpdateContactRequest { id, name, phone } = request;
        // Blank values count as not supplied.
        let name = name.filter(|value| !value.trim().is_empty());
        let phone = phone.filter(|value| !value.trim().is_empty());
        if name.is_none() && phone.is_none() {
            return Err(Error::invalid_request("must update at least one value"));
        }

        let id = ContactId::parse(&id).map_err(Self::invalid_input)?;
        let name = name
            .map(ContactName::new)
            .transpose()
            .map_err(Self::invalid_input)?;

        match phone {
            None => {
                let Some(name) = name else {
                    return Err(Error::invalid_request("must update at least one value"));
                };
                self.apply_patch(&id, &ContactPatch::Rename { name }).await
            }
            Some(phone) => {
                let phone = PhoneNumber::new(phone).map_err(Self::invalid_input)?;
                self.update_with_phone(&id, name, phone).await
            }
        }
    }

    async fn delete_contact(&self, id: &str) -> Result<bool, Error> {
        let Ok(id) = ContactId::parse(id) else {
            debug!("delete ignored malformed contact id");
            return Ok(false);
        };
        let removed = self
            .repository
            .delete(&id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(removed == 1)
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
