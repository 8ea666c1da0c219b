//! Driven port for reading the current local time of a timezone.

use async_trait::async_trait;

use crate::domain::ApiCredential;

use super::AuthorityError;

/// Port for current-time lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeAuthority: Send + Sync {
    /// Return the authority's datetime string for `timezone`.
    async fn current_time(
        &self,
        credential: &ApiCredential,
        timezone: &str,
    ) -> Result<String, AuthorityError>;
}
