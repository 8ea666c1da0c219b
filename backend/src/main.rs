//! Contacts service entry-point: loads settings, prepares the store and the
//! authority client, then serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts::domain::ContactService;
use contacts::inbound::http::health::HealthState;
use contacts::outbound::api_ninjas::ApiNinjasClient;
use contacts::outbound::persistence::{DbPool, DieselContactRepository, run_pending_migrations};
use contacts::settings::ContactsSettings;

use server::{ServerConfig, create_server};

fn boot_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ContactsSettings::load().map_err(|err| boot_error("load settings", err))?;
    let database_url = settings
        .database_url()
        .map_err(|err| boot_error("settings", err))?;
    let authority = settings
        .authority_settings()
        .map_err(|err| boot_error("settings", err))?;
    if authority.credential.is_none() {
        warn!("no API key configured; add, phone update and time lookups will fail");
    }

    run_pending_migrations(database_url)
        .await
        .map_err(|err| boot_error("apply migrations", err))?;

    let pool_config = settings
        .pool_config()
        .map_err(|err| boot_error("settings", err))?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| boot_error("build database pool", err))?;

    let base_url = settings
        .api_base_url()
        .map_err(|err| boot_error("settings", err))?;
    let client = Arc::new(
        ApiNinjasClient::new(base_url, settings.http_timeout())
            .map_err(|err| boot_error("build authority client", err))?,
    );
    info!(
        base_url = %client.base_url(),
        policy = authority.validity_policy.as_str(),
        "authority client ready"
    );

    let service = Arc::new(ContactService::new(
        Arc::new(DieselContactRepository::new(pool)),
        client.clone(),
        client,
        authority,
    ));

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| boot_error("settings", err))?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, service))?;
    server.await
}
