//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactCommand, ContactQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactCommand>,
    pub contacts_query: Arc<dyn ContactQuery>,
}

impl HttpState {
    /// Construct state from the contact use-case ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contacts::domain::{AuthoritySettings, ContactService};
    /// use contacts::inbound::http::state::HttpState;
    /// use contacts::test_support::{
    ///     InMemoryContactRepository, ScriptedPhoneAuthority, ScriptedTimeAuthority,
    /// };
    ///
    /// let service = Arc::new(ContactService::new(
    ///     Arc::new(InMemoryContactRepository::new()),
    ///     Arc::new(ScriptedPhoneAuthority::new()),
    ///     Arc::new(ScriptedTimeAuthority::fixed("2026-10-19 12:00:00")),
    ///     AuthoritySettings::default(),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.contacts_query.clone();
    /// ```
    pub fn new(contacts: Arc<dyn ContactCommand>, contacts_query: Arc<dyn ContactQuery>) -> Self {
        Self {
            contacts,
            contacts_query,
        }
    }
}
