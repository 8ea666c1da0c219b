//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use contacts::domain::ports::{ContactCommand, ContactQuery};

/// Dependencies and binding details for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) contacts: Arc<dyn ContactCommand>,
    pub(crate) contacts_query: Arc<dyn ContactQuery>,
}

impl ServerConfig {
    /// Construct a server configuration around one contact service.
    #[must_use]
    pub fn new<S>(bind_addr: SocketAddr, service: Arc<S>) -> Self
    where
        S: ContactCommand + ContactQuery + 'static,
    {
        Self {
            bind_addr,
            contacts: service.clone(),
            contacts_query: service,
        }
    }
}
