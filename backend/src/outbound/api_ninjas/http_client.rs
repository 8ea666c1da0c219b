//! Reqwest-backed API Ninjas client.
//!
//! This adapter owns transport details only: URL construction, the credential
//! header, timeout and HTTP error mapping, and JSON decoding into domain
//! records. Validity policy and timezone selection stay in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ValidatePhoneDto, WorldTimeDto};
use crate::domain::ports::{AuthorityError, PhoneAuthority, PhoneValidation, TimeAuthority};
use crate::domain::{ApiCredential, PhoneNumber};

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.api-ninjas.com/v1/";

const API_KEY_HEADER: &str = "X-Api-Key";
const VALIDATE_PHONE_PATH: &str = "validatephone";
const WORLD_TIME_PATH: &str = "worldtime";

/// Client for the API Ninjas phone validation and world time endpoints.
#[derive(Debug, Clone)]
pub struct ApiNinjasClient {
    client: Client,
    base_url: Url,
}

impl ApiNinjasClient {
    /// Build a client rooted at `base_url` with an explicit request timeout.
    ///
    /// A missing trailing slash on the base path is added so relative
    /// endpoint paths resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalise_base(base_url),
        })
    }

    /// Base URL the endpoint paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthorityError> {
        self.base_url
            .join(path)
            .map_err(|err| AuthorityError::transport(format!("invalid endpoint {path}: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        credential: &ApiCredential,
        path: &str,
        query: (&str, &str),
    ) -> Result<T, AuthorityError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, credential.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[query])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            debug!(status = status.as_u16(), endpoint = path, "authority rejected request");
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(path, body.as_ref())
    }
}

#[async_trait]
impl PhoneAuthority for ApiNinjasClient {
    async fn validate(
        &self,
        credential: &ApiCredential,
        phone: &PhoneNumber,
    ) -> Result<PhoneValidation, AuthorityError> {
        let dto: ValidatePhoneDto = self
            .get_json(credential, VALIDATE_PHONE_PATH, ("number", phone.as_str()))
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl TimeAuthority for ApiNinjasClient {
    async fn current_time(
        &self,
        credential: &ApiCredential,
        timezone: &str,
    ) -> Result<String, AuthorityError> {
        let dto: WorldTimeDto = self
            .get_json(credential, WORLD_TIME_PATH, ("timezone", timezone))
            .await?;
        Ok(dto.datetime)
    }
}

fn normalise_base(mut base_url: Url) -> Url {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, AuthorityError> {
    serde_json::from_slice(body).map_err(|error| {
        AuthorityError::decode(format!("invalid {endpoint} JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> AuthorityError {
    if error.is_timeout() {
        AuthorityError::transport(format!("request timed out: {error}"))
    } else {
        AuthorityError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AuthorityError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    AuthorityError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
