//! Contact data model.
//!
//! A contact pairs a person's name with a phone number and the country and
//! timezone the phone authority reported for that number. Only the name and
//! phone are caller-supplied; the other two are derived during validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the contact value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// The identifier was empty.
    #[error("contact id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("contact id must be a valid UUID")]
    InvalidId,
    /// The name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// The phone number was blank.
    #[error("phone must not be empty")]
    EmptyPhone,
    /// The phone number had leading or trailing whitespace.
    #[error("phone must not contain surrounding whitespace")]
    PaddedPhone,
}

impl ContactValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyPhone | Self::PaddedPhone => "phone",
        }
    }
}

/// Store-assigned contact identifier.
///
/// # Examples
/// ```
/// use contacts::domain::ContactId;
///
/// let id = ContactId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(ContactId::parse("42").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(Uuid);

impl ContactId {
    /// Parse an identifier from its textual form.
    pub fn parse(raw: &str) -> Result<Self, ContactValidationError> {
        if raw.is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ContactValidationError::InvalidId)
    }

    /// Wrap an identifier already held by the store.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ContactId {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Person name stored on a contact.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactName(String);

impl ContactName {
    /// Validate and construct a [`ContactName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContactName> for String {
    fn from(value: ContactName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContactName {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Phone number exactly as the caller supplied it.
///
/// Uniqueness is decided on this exact text, so the constructor rejects
/// padded input rather than silently trimming it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    ///
    /// # Examples
    /// ```
    /// use contacts::domain::PhoneNumber;
    ///
    /// assert!(PhoneNumber::new("+34600111222").is_ok());
    /// assert!(PhoneNumber::new(" +34600111222").is_err());
    /// ```
    pub fn new(phone: impl Into<String>) -> Result<Self, ContactValidationError> {
        let phone = phone.into();
        if phone.trim().is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        if phone.trim() != phone {
            return Err(ContactValidationError::PaddedPhone);
        }
        Ok(Self(phone))
    }

    /// Borrow the number as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored contact record.
///
/// ## Invariants
/// - `phone` is unique across all contacts.
/// - `country` and `timezone` come from the latest successful validation of
///   `phone` and are never set directly by callers.
/// - `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: ContactId,
    /// Person name.
    pub name: ContactName,
    /// Unique phone number.
    pub phone: PhoneNumber,
    /// Country derived from phone validation.
    pub country: String,
    /// First timezone derived from phone validation.
    pub timezone: String,
}

/// Record handed to the store on creation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Person name.
    pub name: ContactName,
    /// Phone number that passed validation.
    pub phone: PhoneNumber,
    /// Country reported by the phone authority.
    pub country: String,
    /// First timezone reported by the phone authority.
    pub timezone: String,
}

/// Partial update applied to a stored contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactPatch {
    /// Change the name only; phone and derived fields stay untouched.
    Rename { name: ContactName },
    /// Overwrite every mutable field after a fresh phone validation.
    Replace {
        name: Option<ContactName>,
        phone: PhoneNumber,
        country: String,
        timezone: String,
    },
}

impl ContactPatch {
    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, contact: &mut Contact) {
        match self {
            Self::Rename { name } => contact.name = name.clone(),
            Self::Replace {
                name,
                phone,
                country,
                timezone,
            } => {
                if let Some(name) = name {
                    contact.name = name.clone();
                }
                contact.phone = phone.clone();
                contact.country = country.clone();
                contact.timezone = timezone.clone();
            }
        }
    }
}
