//! In-memory adapters for exercising the contact workflow without
//! PostgreSQL or network access.
//!
//! Compiled for unit tests and behind the `test-support` feature so the
//! integration suites in `tests/` can assemble a full HTTP app.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AuthorityError, ContactRepository, ContactRepositoryError, PhoneAuthority, PhoneValidation,
    TimeAuthority,
};
use crate::domain::{ApiCredential, Contact, ContactId, ContactPatch, NewContact, PhoneNumber};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Contact store kept in insertion order that enforces phone uniqueness the
/// way the database constraint does.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored contact in insertion order.
    pub fn contacts(&self) -> Vec<Contact> {
        lock(&self.contacts).clone()
    }

    /// Store `contact` as-is, bypassing validation.
    pub fn seed(&self, contact: Contact) {
        lock(&self.contacts).push(contact);
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(lock(&self.contacts).iter().find(|c| c.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(self.contacts())
    }

    async fn count_by_phone(&self, phone: &PhoneNumber) -> Result<u64, ContactRepositoryError> {
        let count = lock(&self.contacts)
            .iter()
            .filter(|c| c.phone == *phone)
            .count();
        Ok(count as u64)
    }

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(lock(&self.contacts)
            .iter()
            .find(|c| c.phone == *phone)
            .cloned())
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError> {
        let mut contacts = lock(&self.contacts);
        if contacts.iter().any(|c| c.phone == contact.phone) {
            return Err(ContactRepositoryError::duplicate_phone(contact.phone.as_str()));
        }
        let stored = Contact {
            id: ContactId::random(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            country: contact.country.clone(),
            timezone: contact.timezone.clone(),
        };
        contacts.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut contacts = lock(&self.contacts);
        if let ContactPatch::Replace { phone, .. } = patch {
            if contacts.iter().any(|c| c.phone == *phone && c.id != *id) {
                return Err(ContactRepositoryError::duplicate_phone(phone.as_str()));
            }
        }
        let Some(contact) = contacts.iter_mut().find(|c| c.id == *id) else {
            return Ok(None);
        };
        patch.apply_to(contact);
        Ok(Some(contact.clone()))
    }

    async fn delete(&self, id: &ContactId) -> Result<u64, ContactRepositoryError> {
        let mut contacts = lock(&self.contacts);
        let before = contacts.len();
        contacts.retain(|c| c.id != *id);
        Ok((before - contacts.len()) as u64)
    }
}

/// Phone authority answering from a script keyed by phone number.
///
/// Unscripted numbers receive the fallback answer, which by default is a
/// failed lookup so missing setup is loud.
#[derive(Debug)]
pub struct ScriptedPhoneAuthority {
    script: Mutex<HashMap<String, Result<PhoneValidation, AuthorityError>>>,
    fallback: Result<PhoneValidation, AuthorityError>,
    calls: Mutex<Vec<String>>,
}

impl Default for ScriptedPhoneAuthority {
    fn default() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            fallback: Err(AuthorityError::status(404_u16, "unscripted phone number")),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedPhoneAuthority {
    /// Create an authority with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted number with `validation`.
    #[must_use]
    pub fn answering(mut self, validation: PhoneValidation) -> Self {
        self.fallback = Ok(validation);
        self
    }

    /// Script the answer for one phone number.
    pub fn respond(&self, phone: &str, validation: PhoneValidation) {
        lock(&self.script).insert(phone.to_owned(), Ok(validation));
    }

    /// Script a failure for one phone number.
    pub fn fail(&self, phone: &str, error: AuthorityError) {
        lock(&self.script).insert(phone.to_owned(), Err(error));
    }

    /// Phone numbers looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl PhoneAuthority for ScriptedPhoneAuthority {
    async fn validate(
        &self,
        _credential: &ApiCredential,
        phone: &PhoneNumber,
    ) -> Result<PhoneValidation, AuthorityError> {
        lock(&self.calls).push(phone.as_str().to_owned());
        lock(&self.script)
            .get(phone.as_str())
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Time authority returning a fixed answer and recording requested zones.
#[derive(Debug)]
pub struct ScriptedTimeAuthority {
    answer: Mutex<Result<String, AuthorityError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTimeAuthority {
    /// Answer every lookup with `datetime`.
    pub fn fixed(datetime: impl Into<String>) -> Self {
        Self {
            answer: Mutex::new(Ok(datetime.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent lookup fail with `error`.
    pub fn fail_with(&self, error: AuthorityError) {
        *lock(&self.answer) = Err(error);
    }

    /// Timezones requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl TimeAuthority for ScriptedTimeAuthority {
    async fn current_time(
        &self,
        _credential: &ApiCredential,
        timezone: &str,
    ) -> Result<String, AuthorityError> {
        lock(&self.calls).push(timezone.to_owned());
        lock(&self.answer).clone()
    }
}
