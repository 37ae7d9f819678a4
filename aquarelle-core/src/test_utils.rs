//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aquarelle_provider::{
    GenerationOutput, GenerationRequest, ImagePayload, ImageProvider, ProviderError,
};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{CredentialStore, ImageProviderFactory};
use crate::types::StaticCredentials;

// ===== MockCredentialStore =====

pub struct MockCredentialStore {
    entries: RwLock<HashMap<String, String>>,
    /// 为 true 时 set/remove 返回错误
    fail_writes: RwLock<bool>,
    /// 为 true 时 get 返回错误
    fail_reads: RwLock<bool>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fail_writes: RwLock::new(false),
            fail_reads: RwLock::new(false),
        }
    }

    /// 绕过错误注入直接写入
    pub async fn insert(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    pub async fn fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if *self.fail_reads.read().await {
            return Err(CoreError::StorageError("storage unreadable".to_string()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        if *self.fail_writes.read().await {
            return Err(CoreError::StorageError("quota exceeded".to_string()));
        }
        self.insert(key, value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        if *self.fail_writes.read().await {
            return Err(CoreError::StorageError("quota exceeded".to_string()));
        }
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// ===== ScriptedProvider =====

type Reply = Result<GenerationOutput, ProviderError>;

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    requests: Vec<GenerationRequest>,
    call_times: Vec<Instant>,
    keys: Vec<String>,
}

/// 按脚本依次返回结果的 Provider，记录每次调用的请求和时间
struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl ImageProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> aquarelle_provider::Result<bool> {
        Ok(true)
    }

    async fn generate(&self, request: &GenerationRequest) -> aquarelle_provider::Result<GenerationOutput> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request.clone());
        script.call_times.push(Instant::now());
        script.replies.pop_front().unwrap_or_else(|| {
            Err(ProviderError::Unknown {
                provider: "mock".to_string(),
                raw_code: None,
                raw_message: "script exhausted".to_string(),
            })
        })
    }
}

/// 为每次 `create` 返回共享同一脚本的 [`ScriptedProvider`]
pub struct ScriptedProviderFactory {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProviderFactory {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                ..Script::default()
            })),
        })
    }

    /// generate 调用次数
    pub fn calls(&self) -> usize {
        self.script.lock().unwrap().call_times.len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.script.lock().unwrap().call_times.clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// 创建 Provider 时使用的 key
    pub fn keys(&self) -> Vec<String> {
        self.script.lock().unwrap().keys.clone()
    }
}

impl ImageProviderFactory for ScriptedProviderFactory {
    fn create(&self, api_key: &str) -> CoreResult<Arc<dyn ImageProvider>> {
        self.script.lock().unwrap().keys.push(api_key.to_string());
        Ok(Arc::new(ScriptedProvider {
            script: Arc::clone(&self.script),
        }))
    }
}

pub fn image_reply(mime_type: &str, data: &[u8]) -> Reply {
    Ok(GenerationOutput::Image(ImagePayload::new(mime_type, data.to_vec())))
}

pub fn text_reply(text: Option<&str>) -> Reply {
    Ok(GenerationOutput::Text(text.map(str::to_string)))
}

/// HTTP 500 / `INTERNAL`
pub fn internal_error() -> ProviderError {
    ProviderError::InternalError {
        provider: "mock".to_string(),
        status: Some(500),
        raw_message: "An internal error has occurred.".to_string(),
    }
}

/// HTTP 503 / `UNAVAILABLE`
pub fn unavailable_error() -> ProviderError {
    ProviderError::Unknown {
        provider: "mock".to_string(),
        raw_code: Some("UNAVAILABLE".to_string()),
        raw_message: "The model is overloaded.".to_string(),
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`（空脚本 Provider）
pub fn create_test_context(
    static_credentials: StaticCredentials,
) -> (
    Arc<ServiceContext>,
    Arc<MockCredentialStore>,
    Arc<ScriptedProviderFactory>,
) {
    let credential_store = Arc::new(MockCredentialStore::new());
    let provider_factory = ScriptedProviderFactory::new(Vec::new());

    let ctx = Arc::new(ServiceContext::new(
        static_credentials,
        credential_store.clone(),
        provider_factory.clone(),
    ));

    (ctx, credential_store, provider_factory)
}

/// 创建使用指定 Provider 工厂的 `ServiceContext`
pub fn create_test_context_with(
    static_credentials: StaticCredentials,
    provider_factory: Arc<ScriptedProviderFactory>,
) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        static_credentials,
        Arc::new(MockCredentialStore::new()),
        provider_factory,
    ))
}
