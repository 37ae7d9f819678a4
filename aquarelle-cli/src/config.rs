//! CLI configuration file
//!
//! Optional JSON file; missing fields fall back to defaults and command-line
//! flags override whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

const APP_DIR: &str = "aquarelle";
const CONFIG_FILE: &str = "config.json";

/// Durable mapping backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON file in the configuration directory
    #[default]
    File,
    /// System keychain (requires the `keyring-store` feature)
    Keyring,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Generation model; provider default when unset
    pub model: Option<String>,
    /// Prompt sent with every image; watercolour prompt when unset
    pub prompt: Option<String>,
    pub store: StoreKind,
    /// Credentials file for the `file` store
    pub store_path: Option<PathBuf>,
}

impl AppConfig {
    /// `<config dir>/aquarelle/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicitly named file must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(model) = &cli.model {
            self.model = Some(model.clone());
        }
        if let Some(store) = cli.store {
            self.store = store;
        }
        if let Some(path) = &cli.store_path {
            self.store_path = Some(path.clone());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_fields_use_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "model": "gemini-x" }"#).unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-x"));
        assert_eq!(config.store, StoreKind::File);
        assert!(config.prompt.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<AppConfig>(r#"{ "modle": "typo" }"#).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("nope.json"))).is_err());
    }

    #[test]
    fn reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "store": "keyring", "prompt": "Paint it blue", "store_path": "/x/keys.json" }"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.store, StoreKind::Keyring);
        assert_eq!(config.prompt.as_deref(), Some("Paint it blue"));
        assert_eq!(config.store_path, Some(PathBuf::from("/x/keys.json")));
    }

    #[test]
    fn flags_override_file() {
        let config = AppConfig {
            model: Some("from-file".to_string()),
            store: StoreKind::Keyring,
            ..AppConfig::default()
        };
        let cli = Cli::try_parse_from(["aquarelle", "maps-url", "--model", "from-flag", "--store", "file"])
            .unwrap();

        let merged = config.with_overrides(&cli);
        assert_eq!(merged.model.as_deref(), Some("from-flag"));
        assert_eq!(merged.store, StoreKind::File);
    }
}
