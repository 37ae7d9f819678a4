//! Keyring-based credential store.
//!
//! Uses the system keychain (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service) via the `keyring` crate, one entry per logical key.

use async_trait::async_trait;
use keyring::Entry;

use aquarelle_core::error::{CoreError, CoreResult};
use aquarelle_core::traits::CredentialStore;

const SERVICE_NAME: &str = "aquarelle";

/// Keyring-based credential store.
#[derive(Debug, Clone, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> CoreResult<Entry> {
        Entry::new(SERVICE_NAME, key).map_err(|e| CoreError::StorageError(e.to_string()))
    }

    fn read_sync(key: &str) -> CoreResult<Option<String>> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }

    fn write_sync(key: &str, value: &str) -> CoreResult<()> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| CoreError::StorageError(e.to_string()))
    }

    fn delete_sync(key: &str) -> CoreResult<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }
}

fn join_error(e: &tokio::task::JoinError) -> CoreError {
    CoreError::StorageError(format!("Task join error: {e}"))
}

#[async_trait]
impl CredentialStore for KeyringStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            log::debug!("Loading {key} from Keychain");
            Self::read_sync(&key)
        })
        .await
        .map_err(|e| join_error(&e))?
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        tokio::task::spawn_blocking(move || {
            Self::write_sync(&key, &value)?;
            log::info!("Saved {key} to Keychain");
            Ok(())
        })
        .await
        .map_err(|e| join_error(&e))?
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            Self::delete_sync(&key)?;
            log::info!("Removed {key} from Keychain");
            Ok(())
        })
        .await
        .map_err(|e| join_error(&e))?
    }
}
