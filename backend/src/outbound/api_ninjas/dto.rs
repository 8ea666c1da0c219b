//! DTOs for decoding API Ninjas JSON responses.
//!
//! Unknown fields are ignored so provider additions do not break decoding.

use serde::Deserialize;

use crate::domain::ports::PhoneValidation;

/// Body of `GET /validatephone`.
#[derive(Debug, Deserialize)]
pub(super) struct ValidatePhoneDto {
    pub(super) is_valid: bool,
    #[serde(default)]
    pub(super) country: String,
    #[serde(default)]
    pub(super) timezones: Vec<String>,
}

impl From<ValidatePhoneDto> for PhoneValidation {
    fn from(dto: ValidatePhoneDto) -> Self {
        Self {
            is_valid: dto.is_valid,
            country: dto.country,
            timezones: dto.timezones,
        }
    }
}

/// Body of `GET /worldtime`.
#[derive(Debug, Deserialize)]
pub(super) struct WorldTimeDto {
    pub(super) datetime: String,
}
