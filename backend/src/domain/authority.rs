//! Settings governing calls to the phone and time authorities.
//!
//! The workflow receives these once at construction; nothing in the domain
//! reads the environment.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

/// API key sent to the external authorities.
///
/// The key is wiped from memory on drop and never appears in `Debug` output.
///
/// # Examples
/// ```
/// use contacts::domain::ApiCredential;
///
/// let key = ApiCredential::new("s3cret").expect("non-empty key");
/// assert_eq!(key.expose(), "s3cret");
/// assert!(!format!("{key:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(Zeroizing<String>);

impl ApiCredential {
    /// Wrap a key, returning `None` when it is blank.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = Zeroizing::new(key.into());
        if key.trim().is_empty() {
            return None;
        }
        Some(Self(key))
    }

    /// Raw key for the outbound request header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

/// How the authority's `is_valid` flag gates a write.
///
/// [`PhoneValidityPolicy::RequireValid`] is the documented contract.
/// [`PhoneValidityPolicy::LegacyInverted`] keeps the historical inverted gate
/// for deployments whose stored data depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneValidityPolicy {
    /// Accept only numbers the authority reports as valid.
    #[default]
    RequireValid,
    /// Accept only numbers the authority reports as invalid.
    LegacyInverted,
}

impl PhoneValidityPolicy {
    /// Whether a number with the given validity flag may be stored.
    ///
    /// # Examples
    /// ```
    /// use contacts::domain::PhoneValidityPolicy;
    ///
    /// assert!(PhoneValidityPolicy::RequireValid.admits(true));
    /// assert!(PhoneValidityPolicy::LegacyInverted.admits(false));
    /// ```
    pub fn admits(self, is_valid: bool) -> bool {
        match self {
            Self::RequireValid => is_valid,
            Self::LegacyInverted => !is_valid,
        }
    }

    /// Configuration spelling of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequireValid => "require-valid",
            Self::LegacyInverted => "legacy-inverted",
        }
    }
}

impl fmt::Display for PhoneValidityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phone validity policy `{0}`; expected require-valid or legacy-inverted")]
pub struct ParsePhoneValidityPolicyError(String);

impl FromStr for PhoneValidityPolicy {
    type Err = ParsePhoneValidityPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require-valid" => Ok(Self::RequireValid),
            "legacy-inverted" => Ok(Self::LegacyInverted),
            other => Err(ParsePhoneValidityPolicyError(other.to_owned())),
        }
    }
}

/// Credential and policy handed to the contact workflow.
#[derive(Debug, Clone, Default)]
pub struct AuthoritySettings {
    /// Key for the external authorities, when configured.
    pub credential: Option<ApiCredential>,
    /// Gate applied to the phone authority's validity flag.
    pub validity_policy: PhoneValidityPolicy,
}

impl AuthoritySettings {
    /// Build settings from an optional raw key and a policy.
    pub fn new(api_key: Option<&str>, validity_policy: PhoneValidityPolicy) -> Self {
        Self {
            credential: api_key.and_then(ApiCredential::new),
            validity_policy,
        }
    }
}
