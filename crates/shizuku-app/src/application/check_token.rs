//! TokenPresenceCheck: answers whether an OAuth token is stored for this app.

use thiserror::Error;

/// Service name under which the app's secrets are stored.
pub const TOKEN_SERVICE: &str = "LoliaShizuku";

/// Account (key) name of the OAuth token entry.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";

/// Error type for credential store lookups.
///
/// A missing entry is not an error; see [`CredentialStore::get_secret`].
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The store could not be queried (unavailable, access denied, ...).
    #[error("credential store error: {0}")]
    Store(String),
}

/// Trait for reading secrets from the OS credential store.
///
/// The production implementation lives in `infrastructure::credentials`.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Returns the secret stored under `(service, account)`, or `None` when no
    /// such entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] for any failure other than
    /// "not found".
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError>;
}

/// Returns `true` when the OAuth token entry exists.
///
/// # Errors
///
/// Propagates store failures; a missing entry yields `Ok(false)`.
pub fn has_oauth_token(store: &dyn CredentialStore) -> Result<bool, CredentialError> {
    Ok(store.get_secret(TOKEN_SERVICE, OAUTH_TOKEN_KEY)?.is_some())
}
