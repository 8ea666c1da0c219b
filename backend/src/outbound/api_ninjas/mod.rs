//! API Ninjas outbound adapter.
//!
//! One reqwest client serves both the `PhoneAuthority` and `TimeAuthority`
//! ports, authenticating every call with the `X-Api-Key` header.

mod dto;
mod http_client;

pub use http_client::{ApiNinjasClient, DEFAULT_API_BASE_URL};
