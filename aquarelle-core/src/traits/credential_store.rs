//! 凭证存储抽象 Trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// 持久化的 API key 映射（逻辑键名 -> 原始字符串，不加密）
///
/// 平台实现:
/// - CLI 默认: `JsonFileStore`（配置目录下的 JSON 文件）
/// - 可选: `KeyringStore`（系统钥匙串，feature `keyring-store`）
/// - 测试 / 临时会话: [`InMemoryCredentialStore`]
///
/// 只有 `CredentialService` 直接访问此 trait。
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 读取单个 key
    ///
    /// # Returns
    /// * `Ok(Some(value))` - 存在
    /// * `Ok(None)` - 不存在
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// 写入单个 key（覆盖旧值）
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// 删除单个 key，不存在时视为成功
    async fn remove(&self, key: &str) -> CoreResult<()>;
}

/// 内存凭证存储
///
/// 进程退出即丢失，适用于测试和一次性会话。
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
