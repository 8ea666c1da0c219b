//! Behavioural tests for the contacts REST API.
//!
//! Each request builds the full `/api/v1` scope over in-memory adapters, so
//! the scenarios exercise the HTTP mapping and the contact workflow together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use contacts::Trace;
use contacts::domain::ports::PhoneValidation;
use contacts::domain::{
    AuthoritySettings, Contact, ContactId, ContactName, ContactService, PhoneNumber,
    PhoneValidityPolicy, TRACE_ID_HEADER,
};
use contacts::inbound::http::api_scope;
use contacts::inbound::http::state::HttpState;
use contacts::test_support::{
    InMemoryContactRepository, ScriptedPhoneAuthority, ScriptedTimeAuthority,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const API_KEY: &str = "test-key";

struct ContactsWorld {
    repository: Arc<InMemoryContactRepository>,
    phone_authority: Arc<ScriptedPhoneAuthority>,
    time_authority: Arc<ScriptedTimeAuthority>,
    settings: AuthoritySettings,
    stored: HashMap<String, Contact>,
    before_request: Vec<Contact>,
    last_status: Option<u16>,
    last_body: Option<Value>,
    last_trace_id: Option<String>,
}

impl Default for ContactsWorld {
    fn default() -> Self {
        Self {
            repository: Arc::new(InMemoryContactRepository::new()),
            phone_authority: Arc::new(ScriptedPhoneAuthority::new()),
            time_authority: Arc::new(ScriptedTimeAuthority::fixed("1970-01-01 00:00:00")),
            settings: AuthoritySettings::new(Some(API_KEY), PhoneValidityPolicy::RequireValid),
            stored: HashMap::new(),
            before_request: Vec::new(),
            last_status: None,
            last_body: None,
            last_trace_id: None,
        }
    }
}

impl std::fmt::Debug for ContactsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactsWorld")
            .field("stored", &self.stored.keys().collect::<Vec<_>>())
            .field("last_status", &self.last_status)
            .field("last_body", &self.last_body)
            .finish_non_exhaustive()
    }
}

#[fixture]
fn world() -> Mutex<ContactsWorld> {
    Mutex::new(ContactsWorld::default())
}

struct Captured {
    status: u16,
    trace_id: Option<String>,
    body: Value,
}

fn perform(world: &Mutex<ContactsWorld>, request: TestRequest) {
    let state = {
        let mut ctx = world.lock().expect("world lock");
        ctx.before_request = ctx.repository.contacts();
        let service = Arc::new(ContactService::new(
            ctx.repository.clone(),
            ctx.phone_authority.clone(),
            ctx.time_authority.clone(),
            ctx.settings.clone(),
        ));
        HttpState::new(service.clone(), service)
    };

    let captured = actix_web::rt::System::new().block_on(async move {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(Trace)
                .service(api_scope()),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = actix_test::read_body(response).await;
        let body = serde_json::from_slice(&body).expect("json body");
        Captured {
            status,
            trace_id,
            body,
        }
    });

    let mut ctx = world.lock().expect("world lock");
    ctx.last_status = Some(captured.status);
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = Some(captured.body);
}

fn stored_id(world: &Mutex<ContactsWorld>, name: &str) -> String {
    let ctx = world.lock().expect("world lock");
    ctx.stored
        .get(name)
        .map(|contact| contact.id.to_string())
        .unwrap_or_else(|| panic!("no stored contact named {name}"))
}

fn last_body(world: &Mutex<ContactsWorld>) -> Value {
    world
        .lock()
        .expect("world lock")
        .last_body
        .clone()
        .expect("response body")
}

#[given("an empty contact store")]
fn an_empty_contact_store(world: &Mutex<ContactsWorld>) {
    let ctx = world.lock().expect("world lock");
    assert!(ctx.repository.contacts().is_empty());
}

#[given("a stored contact named {name} with phone {phone}")]
fn a_stored_contact(world: &Mutex<ContactsWorld>, name: String, phone: String) {
    let contact = Contact {
        id: ContactId::random(),
        name: ContactName::new(&name).expect("name"),
        phone: PhoneNumber::new(phone).expect("phone"),
        country: "Spain".to_owned(),
        timezone: "Europe/Madrid".to_owned(),
    };
    let mut ctx = world.lock().expect("world lock");
    ctx.repository.seed(contact.clone());
    ctx.stored.insert(name, contact);
}

#[given("the phone authority reports {phone} as {verdict} in {country} with timezone {timezone}")]
fn the_phone_authority_reports(
    world: &Mutex<ContactsWorld>,
    phone: String,
    verdict: String,
    country: String,
    timezone: String,
) {
    let is_valid = match verdict.as_str() {
        "valid" => true,
        "invalid" => false,
        other => panic!("unknown verdict {other}"),
    };
    let ctx = world.lock().expect("world lock");
    ctx.phone_authority.respond(
        &phone,
        PhoneValidation {
            is_valid,
            country,
            timezones: vec![timezone],
        },
    );
}

#[given("the service uses the {policy} validity policy")]
fn the_service_uses_policy(world: &Mutex<ContactsWorld>, policy: String) {
    let policy: PhoneValidityPolicy = policy.parse().expect("known policy");
    world.lock().expect("world lock").settings.validity_policy = policy;
}

#[given("no API key is configured")]
fn no_api_key_is_configured(world: &Mutex<ContactsWorld>) {
    world.lock().expect("world lock").settings.credential = None;
}

#[given("the time authority reports {datetime}")]
fn the_time_authority_reports(world: &Mutex<ContactsWorld>, datetime: String) {
    world.lock().expect("world lock").time_authority = Arc::new(ScriptedTimeAuthority::fixed(datetime));
}

#[when("the client adds a contact named {name} with phone {phone}")]
fn the_client_adds_a_contact(world: &Mutex<ContactsWorld>, name: String, phone: String) {
    perform(
        world,
        TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(json!({ "name": name, "phone": phone })),
    );
}

#[when("the client updates {name} without any fields")]
fn the_client_updates_without_fields(world: &Mutex<ContactsWorld>, name: String) {
    let id = stored_id(world, &name);
    perform(
        world,
        TestRequest::patch()
            .uri(&format!("/api/v1/contacts/{id}"))
            .set_json(json!({})),
    );
}

#[when("the client renames {name} to {new_name}")]
fn the_client_renames(world: &Mutex<ContactsWorld>, name: String, new_name: String) {
    let id = stored_id(world, &name);
    perform(
        world,
        TestRequest::patch()
            .uri(&format!("/api/v1/contacts/{id}"))
            .set_json(json!({ "name": new_name })),
    );
}

#[when("the client changes the phone of {name} to {phone}")]
fn the_client_changes_the_phone(world: &Mutex<ContactsWorld>, name: String, phone: String) {
    let id = stored_id(world, &name);
    perform(
        world,
        TestRequest::patch()
            .uri(&format!("/api/v1/contacts/{id}"))
            .set_json(json!({ "phone": phone })),
    );
}

#[when("the client deletes an unknown contact")]
fn the_client_deletes_an_unknown_contact(world: &Mutex<ContactsWorld>) {
    let id = ContactId::random();
    perform(
        world,
        TestRequest::delete().uri(&format!("/api/v1/contacts/{id}")),
    );
}

#[when("the client deletes the contact named {name}")]
fn the_client_deletes_the_contact(world: &Mutex<ContactsWorld>, name: String) {
    let id = stored_id(world, &name);
    perform(
        world,
        TestRequest::delete().uri(&format!("/api/v1/contacts/{id}")),
    );
}

#[when("the client asks for the local time of {name}")]
fn the_client_asks_for_the_local_time(world: &Mutex<ContactsWorld>, name: String) {
    let id = stored_id(world, &name);
    perform(
        world,
        TestRequest::get().uri(&format!("/api/v1/contacts/{id}/time")),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &Mutex<ContactsWorld>, status: u16) {
    let ctx = world.lock().expect("world lock");
    assert_eq!(ctx.last_status, Some(status), "body: {:?}", ctx.last_body);
    assert!(ctx.last_trace_id.is_some(), "trace-id header missing");
}

#[then("the response is an error with status {status} and code {code}")]
fn the_response_is_an_error(world: &Mutex<ContactsWorld>, status: u16, code: String) {
    let ctx = world.lock().expect("world lock");
    assert_eq!(ctx.last_status, Some(status), "body: {:?}", ctx.last_body);
    let body = ctx.last_body.as_ref().expect("response body");
    assert_eq!(body.get("code").and_then(Value::as_str), Some(code.as_str()));
    assert_eq!(
        body.get("traceId").and_then(Value::as_str),
        ctx.last_trace_id.as_deref()
    );
}

#[then("fetching the added contact returns the same record")]
fn fetching_the_added_contact_returns_the_same_record(world: &Mutex<ContactsWorld>) {
    let added = last_body(world);
    let id = added
        .get("id")
        .and_then(Value::as_str)
        .expect("created id")
        .to_owned();

    perform(world, TestRequest::get().uri(&format!("/api/v1/contacts/{id}")));
    assert_eq!(last_body(world), added);
}

#[then("the store holds {count} contact with phone {phone}")]
fn the_store_holds(world: &Mutex<ContactsWorld>, count: usize, phone: String) {
    let ctx = world.lock().expect("world lock");
    let matching = ctx
        .repository
        .contacts()
        .into_iter()
        .filter(|contact| contact.phone.as_str() == phone)
        .count();
    assert_eq!(matching, count);
}

#[then("the store is unchanged")]
fn the_store_is_unchanged(world: &Mutex<ContactsWorld>) {
    let ctx = world.lock().expect("world lock");
    assert_eq!(ctx.repository.contacts(), ctx.before_request);
}

#[then("the stored contact previously named {name} is called {new_name} with unchanged phone details")]
fn the_stored_contact_is_renamed(world: &Mutex<ContactsWorld>, name: String, new_name: String) {
    let ctx = world.lock().expect("world lock");
    let original = ctx.stored.get(&name).expect("stored contact");
    let current = ctx
        .repository
        .contacts()
        .into_iter()
        .find(|contact| contact.id == original.id)
        .expect("contact still stored");
    assert_eq!(current.name.as_str(), new_name);
    assert_eq!(current.phone, original.phone);
    assert_eq!(current.country, original.country);
    assert_eq!(current.timezone, original.timezone);
}

#[then("the delete outcome is {outcome}")]
fn the_delete_outcome_is(world: &Mutex<ContactsWorld>, outcome: bool) {
    assert_eq!(last_body(world), json!({ "deleted": outcome }));
}

#[then("fetching the contact named {name} returns null")]
fn fetching_the_contact_returns_null(world: &Mutex<ContactsWorld>, name: String) {
    let id = stored_id(world, &name);
    perform(world, TestRequest::get().uri(&format!("/api/v1/contacts/{id}")));
    let ctx = world.lock().expect("world lock");
    assert_eq!(ctx.last_status, Some(200));
    assert_eq!(ctx.last_body, Some(Value::Null));
}

#[then("the response contact has country {country} and timezone {timezone}")]
fn the_response_contact_has(world: &Mutex<ContactsWorld>, country: String, timezone: String) {
    let body = last_body(world);
    assert_eq!(body.get("country").and_then(Value::as_str), Some(country.as_str()));
    assert_eq!(
        body.get("timezone").and_then(Value::as_str),
        Some(timezone.as_str())
    );
}

#[then("the phone authority was not called")]
fn the_phone_authority_was_not_called(world: &Mutex<ContactsWorld>) {
    let ctx = world.lock().expect("world lock");
    assert!(ctx.phone_authority.calls().is_empty());
}

#[then("the response datetime is {datetime}")]
fn the_response_datetime_is(world: &Mutex<ContactsWorld>, datetime: String) {
    assert_eq!(last_body(world), json!({ "datetime": datetime }));
}

#[then("the time authority was asked for {timezone}")]
fn the_time_authority_was_asked_for(world: &Mutex<ContactsWorld>, timezone: String) {
    let ctx = world.lock().expect("world lock");
    assert_eq!(ctx.time_authority.calls(), vec![timezone]);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Added contacts can be fetched by id"
)]
fn added_contacts_can_be_fetched(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Adding a phone twice is rejected"
)]
fn adding_a_phone_twice_is_rejected(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Updates without changes are rejected"
)]
fn updates_without_changes_are_rejected(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Renaming keeps the phone details"
)]
fn renaming_keeps_the_phone_details(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Taking another contact's phone conflicts"
)]
fn taking_another_contacts_phone_conflicts(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Deleting reports whether a contact was removed"
)]
fn deleting_reports_whether_a_contact_was_removed(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Legacy policy accepts numbers the authority flags invalid"
)]
fn legacy_policy_accepts_flagged_numbers(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Writes need an API key"
)]
fn writes_need_an_api_key(world: Mutex<ContactsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/contacts_api.feature",
    name = "Contact time comes from the stored timezone"
)]
fn contact_time_comes_from_the_stored_timezone(world: Mutex<ContactsWorld>) {
    drop(world);
}
