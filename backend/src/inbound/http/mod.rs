//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

pub mod contacts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// Versioned API scope with every contact endpoint registered.
///
/// Handlers expect [`state::HttpState`] as application data.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .service(contacts::list_contacts)
        .service(contacts::add_contact)
        .service(contacts::contact_time)
        .service(contacts::get_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
}
