//! 地图加载器服务

use std::sync::Arc;

use aquarelle_provider::{create_maps_loader, MapsLoader};

use crate::error::{CoreError, CoreResult};
use crate::services::{CredentialService, ServiceContext};
use crate::types::CredentialKind;

/// 地图加载器服务
///
/// 每次调用都重新解析 key 并返回新的 [`MapsLoader`]，key 变更后无需手动重置。
pub struct MapsService {
    ctx: Arc<ServiceContext>,
}

impl MapsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn loader(&self) -> CoreResult<MapsLoader> {
        let api_key = CredentialService::new(Arc::clone(&self.ctx))
            .resolve_key(CredentialKind::Maps)
            .await
            .ok_or(CoreError::CredentialsMissing(CredentialKind::Maps))?;
        Ok(create_maps_loader(api_key)?)
    }
}
