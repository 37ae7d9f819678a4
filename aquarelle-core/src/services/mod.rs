//! 业务逻辑服务层

mod credential_service;
mod generation_service;
mod maps_service;

pub use credential_service::CredentialService;
pub use generation_service::{GenerationOptions, GenerationService, RetryPolicy, WATERCOLOR_PROMPT};
pub use maps_service::MapsService;

use std::sync::Arc;

use crate::traits::{CredentialStore, ImageProviderFactory};
use crate::types::StaticCredentials;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// 静态配置层（启动时读取，不可变）
    static_credentials: StaticCredentials,
    /// 持久化凭证存储
    credential_store: Arc<dyn CredentialStore>,
    /// 生成 Provider 工厂
    provider_factory: Arc<dyn ImageProviderFactory>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        static_credentials: StaticCredentials,
        credential_store: Arc<dyn CredentialStore>,
        provider_factory: Arc<dyn ImageProviderFactory>,
    ) -> Self {
        Self {
            static_credentials,
            credential_store,
            provider_factory,
        }
    }

    pub fn static_credentials(&self) -> &StaticCredentials {
        &self.static_credentials
    }

    pub(crate) fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.credential_store
    }

    pub fn provider_factory(&self) -> &Arc<dyn ImageProviderFactory> {
        &self.provider_factory
    }
}
