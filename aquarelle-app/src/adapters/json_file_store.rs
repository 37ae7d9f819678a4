//! JSON file credential store.
//!
//! Keeps the mapping as a single flat JSON object:
//!
//! ```json
//! { "generation_api_key": "AI...", "maps_api_key": "..." }
//! ```
//!
//! Values are stored as-is, not encrypted. Every write replaces the file
//! through a temporary sibling and a rename. A file that does not parse reads
//! as an error, and the next `set` or `remove` overwrites it.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use aquarelle_core::error::{CoreError, CoreResult};
use aquarelle_core::traits::CredentialStore;

const APP_DIR: &str = "aquarelle";
const FILE_NAME: &str = "credentials.json";

type Entries = BTreeMap<String, String>;

/// File-backed credential store.
pub struct JsonFileStore {
    path: PathBuf,
    /// 串行化读-改-写
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<config dir>/aquarelle/credentials.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Store at [`default_path`](Self::default_path).
    pub fn at_default_path() -> CoreResult<Self> {
        Self::default_path().map(Self::new).ok_or_else(|| {
            CoreError::StorageError("Unable to determine the configuration directory".to_string())
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> CoreResult<Entries> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(Entries::new()),
            Ok(json) => serde_json::from_str(&json).map_err(|e| {
                CoreError::SerializationError(format!(
                    "{} is not a JSON object of strings: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(CoreError::StorageError(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// 写路径读取：无法解析的文件按空映射处理，返回值第二项表示是否丢弃了旧内容
    async fn read_entries_for_update(&self) -> CoreResult<(Entries, bool)> {
        match self.read_entries().await {
            Ok(entries) => Ok((entries, false)),
            Err(CoreError::SerializationError(detail)) => {
                log::warn!("Replacing unreadable credential file: {detail}");
                Ok((Entries::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", &e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error("write", &e))?;
        restrict_permissions(&tmp).await?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error("replace", &e))?;

        log::debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn io_error(&self, action: &str, e: &std::io::Error) -> CoreError {
        CoreError::StorageError(format!("Failed to {action} {}: {e}", self.path.display()))
    }
}

/// 仅文件所有者可读写
#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> CoreResult<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(|e| {
            CoreError::StorageError(format!(
                "Failed to set permissions on {}: {e}",
                path.display()
            ))
        })
}

#[cfg(not(unix))]
#[allow(clippy::unused_async)]
async fn restrict_permissions(_path: &Path) -> CoreResult<()> {
    Ok(())
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, _) = self.read_entries_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await?;
        log::info!("Saved {key} to {}", self.path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, discarded) = self.read_entries_for_update().await?;
        if entries.remove(key).is_some() || discarded {
            self.write_entries(&entries).await?;
            log::info!("Removed {key} from {}", self.path.display());
        }
        Ok(())
    }
}
