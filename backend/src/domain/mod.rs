//! Domain primitives, ports, and the contact workflow.
//!
//! Purpose: Define strongly typed contact entities and the service that
//! validates them against the external authorities. Nothing here depends on
//! HTTP, Diesel, or reqwest; adapters reach the domain only through `ports`.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Contact (alias to `contact::Contact`) — stored contact record.
//! - ContactService — implementation of the contact driving ports.
//! - TraceId — per-request correlation identifier.

pub mod authority;
pub mod contact;
mod contact_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::authority::{
    ApiCredential, AuthoritySettings, ParsePhoneValidityPolicyError, PhoneValidityPolicy,
};
pub use self::contact::{
    Contact, ContactId, ContactName, ContactPatch, ContactValidationError, NewContact, PhoneNumber,
};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use contacts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
