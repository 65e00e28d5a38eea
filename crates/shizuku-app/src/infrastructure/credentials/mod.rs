//! OS credential store adapter backed by the `keyring` crate.
//!
//! | OS      | Backing store                                      |
//! |---------|----------------------------------------------------|
//! | Windows | Credential Manager                                 |
//! | macOS   | Keychain                                           |
//! | Linux   | Secret Service (GNOME Keyring, KWallet) over D-Bus |
//!
//! Lookups are blocking calls into the OS; async callers should run them on
//! `tokio::task::spawn_blocking`.

use tracing::debug;

use crate::application::check_token::{CredentialError, CredentialStore};

/// [`CredentialStore`] implementation using the platform keyring.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringCredentialStore;

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError> {
        let entry = keyring::Entry::new(service, account)
            .map_err(|e| CredentialError::Store(e.to_string()))?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => {
                debug!("no credential stored for {service}/{account}");
                Ok(None)
            }
            Err(e) => Err(CredentialError::Store(e.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// These talk to the real platform store (Secret Service on Linux, so a running
// keyring daemon on the session bus is required) and are skipped by default.
// Run with `cargo test -- --ignored` on a desktop session.
