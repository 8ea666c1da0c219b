//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every contact endpoint, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it
//! in debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::contacts::{
    ContactChangesRequest, ContactResponse, ContactTimeResponse, CreateContactRequest,
    DeleteContactResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "Contact records with externally validated phone numbers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::add_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::contacts::contact_time,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactResponse,
        CreateContactRequest,
        ContactChangesRequest,
        ContactTimeResponse,
        DeleteContactResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "contacts", description = "Contact records and derived local time"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
