//! Command implementations and shared output helpers.

pub mod keys;
pub mod maps;
pub mod paint;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use aquarelle_app::adapters::JsonFileStore;
use aquarelle_app::{AppState, AppStateBuilder};
use aquarelle_core::services::GenerationOptions;
use aquarelle_core::traits::{CredentialStore, DefaultImageProviderFactory};
use aquarelle_core::types::StaticCredentials;

use crate::config::{AppConfig, StoreKind};

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(result).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Wire adapters according to the configuration.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let credential_store = credential_store(config)?;

    let provider_factory = match &config.model {
        Some(model) => DefaultImageProviderFactory::with_model(model),
        None => DefaultImageProviderFactory::new(),
    };

    let mut options = GenerationOptions::default();
    if let Some(prompt) = &config.prompt {
        options.prompt.clone_from(prompt);
    }

    let state = AppStateBuilder::new()
        .static_credentials(StaticCredentials::from_env())
        .credential_store(credential_store)
        .provider_factory(Arc::new(provider_factory))
        .generation_options(options)
        .build()?;
    Ok(state)
}

fn credential_store(config: &AppConfig) -> Result<Arc<dyn CredentialStore>> {
    match config.store {
        StoreKind::File => {
            let store = match &config.store_path {
                Some(path) => JsonFileStore::new(path.clone()),
                None => JsonFileStore::at_default_path()
                    .context("Use --store-path to choose a credentials file")?,
            };
            tracing::debug!("Using credentials file {}", store.path().display());
            Ok(Arc::new(store))
        }
        #[cfg(feature = "keyring-store")]
        StoreKind::Keyring => Ok(Arc::new(aquarelle_app::adapters::KeyringStore::new())),
        #[cfg(not(feature = "keyring-store"))]
        StoreKind::Keyring => {
            anyhow::bail!("This build has no keychain support; rebuild with the `keyring-store` feature")
        }
    }
}
