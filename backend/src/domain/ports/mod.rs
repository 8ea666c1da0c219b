//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe what the workflow needs from the contact store and
//! the external authorities. Driving ports describe what inbound adapters may
//! ask of the workflow. Each driven port exposes a strongly typed error so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_command;
mod contact_query;
mod contact_repository;
mod phone_authority;
mod time_authority;

#[cfg(test)]
pub use contact_command::MockContactCommand;
pub use contact_command::{AddContactRequest, ContactCommand, UpdateContactRequest};
#[cfg(test)]
pub use contact_query::MockContactQuery;
pub use contact_query::ContactQuery;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use phone_authority::MockPhoneAuthority;
pub use phone_authority::{AuthorityError, PhoneAuthority, PhoneValidation};
#[cfg(test)]
pub use time_authority::MockTimeAuthority;
pub use time_authority::TimeAuthority;
