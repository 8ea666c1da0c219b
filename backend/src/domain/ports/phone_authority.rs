//! Driven port for validating phone numbers with an external authority.
//!
//! The domain owns the response contract so the workflow stays independent
//! of any particular provider's wire format.

use async_trait::async_trait;

use crate::domain::{ApiCredential, PhoneNumber};

use super::define_port_error;

/// Authority verdict for one phone number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneValidation {
    /// Whether the authority considers the number valid.
    pub is_valid: bool,
    /// Country the number is registered in.
    pub country: String,
    /// Candidate timezones for the number, most likely first.
    pub timezones: Vec<String>,
}

define_port_error! {
    /// Errors surfaced while calling an external authority.
    pub enum AuthorityError {
        /// The request never produced a response.
        Transport { message: String } =>
            "authority transport failed: {message}",
        /// The authority answered with a non-success status.
        Status { status: u16, message: String } =>
            "authority returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "authority response decode failed: {message}",
    }
}

/// Port for phone number validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhoneAuthority: Send + Sync {
    /// Validate `phone`, authenticating with `credential`.
    async fn validate(
        &self,
        credential: &ApiCredential,
        phone: &PhoneNumber,
    ) -> Result<PhoneValidation, AuthorityError>;
}
