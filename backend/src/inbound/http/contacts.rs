//! Contact HTTP handlers.
//!
//! ```text
//! GET    /api/v1/contacts
//! POST   /api/v1/contacts
//! GET    /api/v1/contacts/{id}
//! PATCH  /api/v1/contacts/{id}
//! DELETE /api/v1/contacts/{id}
//! GET    /api/v1/contacts/{id}/time
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{AddContactRequest, UpdateContactRequest};
use crate::domain::{Contact, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

const NAME_FIELD: FieldName = FieldName::new("name");
const PHONE_FIELD: FieldName = FieldName::new("phone");

/// Request payload for creating a contact.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(example = "+34600111222")]
    pub phone: Option<String>,
}

/// Request payload for a partial contact update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactChangesRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Response payload describing a stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "+34600111222")]
    pub phone: String,
    #[schema(example = "Spain")]
    pub country: String,
    #[schema(example = "Europe/Madrid")]
    pub timezone: String,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            phone: value.phone.as_str().to_owned(),
            country: value.country,
            timezone: value.timezone,
        }
    }
}

/// Current local time of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ContactTimeResponse {
    #[schema(example = "2026-10-19 14:03:11")]
    pub datetime: String,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteContactResponse {
    pub deleted: bool,
}

fn parse_create_request(payload: CreateContactRequest) -> Result<AddContactRequest, Error> {
    Ok(AddContactRequest {
        name: require_field(payload.name, NAME_FIELD)?,
        phone: require_field(payload.phone, PHONE_FIELD)?,
    })
}

/// List every stored contact.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    responses(
        (status = 200, description = "Stored contacts", body = [ContactResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state.contacts_query.list_contacts().await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Fetch one contact. An unknown identifier answers JSON `null`.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    responses(
        (status = 200, description = "The contact, or null when absent", body = ContactResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<ContactResponse>>> {
    let contact = state.contacts_query.get_contact(&path).await?;
    Ok(web::Json(contact.map(ContactResponse::from)))
}

/// Validate and store a new contact.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Created contact", body = ContactResponse),
        (status = 400, description = "Invalid request or rejected phone", body = ErrorSchema),
        (status = 409, description = "Phone already exists", body = ErrorSchema),
        (status = 502, description = "Phone authority unavailable", body = ErrorSchema),
        (status = 503, description = "No API credential configured", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "addContact"
)]
#[post("/contacts")]
pub async fn add_contact(
    state: web::Data<HttpState>,
    payload: web::Json<CreateContactRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let contact = state.contacts.add_contact(request).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Change the name and/or phone of a stored contact.
#[utoipa::path(
    patch,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    request_body = ContactChangesRequest,
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Invalid request or rejected phone", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema),
        (status = 409, description = "Phone belongs to another contact", body = ErrorSchema),
        (status = 502, description = "Phone authority unavailable", body = ErrorSchema),
        (status = 503, description = "No API credential configured", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[patch("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ContactChangesRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let ContactChangesRequest { name, phone } = payload.into_inner();
    let contact = state
        .contacts
        .update_contact(UpdateContactRequest {
            id: path.into_inner(),
            name,
            phone,
        })
        .await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Delete a contact. Malformed or unknown identifiers report `false`.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Whether a contact was removed", body = DeleteContactResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteContactResponse>> {
    let deleted = state.contacts.delete_contact(&path).await?;
    Ok(web::Json(DeleteContactResponse { deleted }))
}

/// Resolve the current local time in the contact's timezone.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}/time",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    responses(
        (status = 200, description = "Current local time", body = ContactTimeResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema),
        (status = 502, description = "Time authority unavailable", body = ErrorSchema),
        (status = 503, description = "No API credential configured", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContactTime"
)]
#[get("/contacts/{id}/time")]
pub async fn contact_time(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactTimeResponse>> {
    let id = path.into_inner();
    let Some(contact) = state.contacts_query.get_contact(&id).await? else {
        return Err(Error::not_found(format!("contact {id} not found"))
            .with_details(json!({ "id": id })));
    };
    let datetime = state.contacts_query.contact_time(&contact).await?;
    Ok(web::Json(ContactTimeResponse { datetime }))
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
