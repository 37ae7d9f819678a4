//! 凭证服务
//!
//! 负责 API key 的分层查找（静态配置优先，其次本地存储）、格式校验、保存和清除。
//! 每次查找都重新读取两层，不做跨调用缓存。

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    normalize_key, validate_keys, CredentialKind, CredentialPair, CredentialSource,
    CredentialStatus, ValidationResult,
};

/// 凭证服务
pub struct CredentialService {
    ctx: Arc<ServiceContext>,
}

impl CredentialService {
    /// 创建凭证服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 按层查找两个 key，每个 key 独立决定来源
    ///
    /// 存储读取失败会记录警告并视为缺失，不会返回错误。
    pub async fn resolve(&self) -> CredentialPair {
        let (generation_key, _) = self.lookup(CredentialKind::Generation).await;
        let (maps_key, _) = self.lookup(CredentialKind::Maps).await;
        CredentialPair {
            generation_key,
            maps_key,
        }
    }

    /// 查找单个 key
    pub async fn resolve_key(&self, kind: CredentialKind) -> Option<String> {
        self.lookup(kind).await.0
    }

    /// 两个 key 是否均可用
    pub async fn are_available(&self) -> bool {
        self.resolve().await.is_complete()
    }

    /// 每个 key 来自哪一层（不包含 key 本身）
    pub async fn status(&self) -> CredentialStatus {
        let (_, generation) = self.lookup(CredentialKind::Generation).await;
        let (_, maps) = self.lookup(CredentialKind::Maps).await;
        CredentialStatus { generation, maps }
    }

    /// 格式校验（纯函数，不访问任何存储）
    pub fn validate(generation: &str, maps: &str) -> ValidationResult {
        validate_keys(generation, maps)
    }

    /// 保存存在的 key，缺失的 key 保持原样
    ///
    /// 任一写入失败都返回 [`CoreError::Persistence`]，不重试。
    pub async fn store(&self, pair: &CredentialPair) -> CoreResult<()> {
        for kind in CredentialKind::ALL {
            // 写入前统一去空白，空白值视为缺失
            let Some(value) = normalize_key(pair.get(kind)) else {
                continue;
            };
            if let Err(e) = self
                .ctx
                .credential_store()
                .set(kind.storage_key(), &value)
                .await
            {
                log::error!("Failed to store {}: {e}", kind.storage_key());
                return Err(CoreError::Persistence(e.to_string()));
            }
            log::info!("Stored {} API key", kind.label());
        }
        Ok(())
    }

    /// 删除两个已存储的 key
    ///
    /// 存储错误只记录警告，不会返回。
    pub async fn clear(&self) {
        for kind in CredentialKind::ALL {
            if let Err(e) = self.ctx.credential_store().remove(kind.storage_key()).await {
                log::warn!("Failed to clear stored {}: {e}", kind.storage_key());
            }
        }
        log::info!("Cleared stored API keys");
    }

    async fn lookup(&self, kind: CredentialKind) -> (Option<String>, CredentialSource) {
        if let Some(value) = self.ctx.static_credentials().get(kind) {
            return (Some(value.to_string()), CredentialSource::Config);
        }

        match self.ctx.credential_store().get(kind.storage_key()).await {
            Ok(value) => match normalize_key(value.as_deref()) {
                Some(value) => (Some(value), CredentialSource::Stored),
                None => (None, CredentialSource::Missing),
            },
            Err(e) => {
                log::warn!("Failed to read stored {}: {e}", kind.storage_key());
                (None, CredentialSource::Missing)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_context, MockCredentialStore};
    use crate::traits::CredentialStore;
    use crate::types::StaticCredentials;

    const MAPS_KEY: &str = "somekeywithmorethan30characters0000";

    fn service(
        static_credentials: StaticCredentials,
    ) -> (CredentialService, Arc<MockCredentialStore>) {
        let (ctx, store, _) = create_test_context(static_credentials);
        (CredentialService::new(ctx), store)
    }

    #[tokio::test]
    async fn nothing_configured_resolves_empty() {
        let (svc, _) = service(StaticCredentials::none());
        assert_eq!(svc.resolve().await, CredentialPair::default());
        assert!(!svc.are_available().await);
    }

    #[tokio::test]
    async fn precedence_is_per_key() {
        let (svc, store) = service(StaticCredentials::new(Some("CFG"), None));
        store.insert("generation_api_key", "STORED").await;
        store.insert("maps_api_key", "STOREDMAPS").await;

        let pair = svc.resolve().await;
        assert_eq!(pair.generation_key.as_deref(), Some("CFG"));
        assert_eq!(pair.maps_key.as_deref(), Some("STOREDMAPS"));

        let status = svc.status().await;
        assert_eq!(status.generation, CredentialSource::Config);
        assert_eq!(status.maps, CredentialSource::Stored);
    }

    #[tokio::test]
    async fn blank_config_falls_through_to_storage() {
        let (svc, store) = service(StaticCredentials::new(Some("   "), None));
        store.insert("generation_api_key", "AIzaStored").await;

        assert_eq!(
            svc.resolve_key(CredentialKind::Generation).await.as_deref(),
            Some("AIzaStored")
        );
    }

    #[tokio::test]
    async fn blank_stored_value_is_absent() {
        let (svc, store) = service(StaticCredentials::none());
        store.insert("maps_api_key", "  ").await;

        assert_eq!(svc.resolve_key(CredentialKind::Maps).await, None);
        assert_eq!(svc.status().await.maps, CredentialSource::Missing);
    }

    #[tokio::test]
    async fn store_then_resolve_round_trips() {
        let (svc, _) = service(StaticCredentials::none());
        let pair = CredentialPair::new(Some("AIzaKey"), Some(MAPS_KEY));

        svc.store(&pair).await.unwrap();

        assert_eq!(svc.resolve().await, pair);
        assert!(svc.are_available().await);
    }

    #[tokio::test]
    async fn store_leaves_absent_fields_untouched() {
        let (svc, store) = service(StaticCredentials::none());
        store.insert("maps_api_key", MAPS_KEY).await;

        svc.store(&CredentialPair::new(Some("AIzaNew"), None))
            .await
            .unwrap();

        let pair = svc.resolve().await;
        assert_eq!(pair.generation_key.as_deref(), Some("AIzaNew"));
        assert_eq!(pair.maps_key.as_deref(), Some(MAPS_KEY));
    }

    #[tokio::test]
    async fn store_is_last_write_wins() {
        let (svc, _) = service(StaticCredentials::none());
        svc.store(&CredentialPair::new(Some("AIzaOne"), None))
            .await
            .unwrap();
        svc.store(&CredentialPair::new(Some("AIzaTwo"), None))
            .await
            .unwrap();

        assert_eq!(
            svc.resolve_key(CredentialKind::Generation).await.as_deref(),
            Some("AIzaTwo")
        );
    }

    #[tokio::test]
    async fn store_trims_and_skips_blank_fields() {
        let (svc, store) = service(StaticCredentials::none());
        store.insert("generation_api_key", "AIzaKept").await;

        svc.store(&CredentialPair {
            generation_key: Some("   ".to_string()),
            maps_key: Some(format!("  {MAPS_KEY}\n")),
        })
        .await
        .unwrap();

        assert_eq!(
            store.get("generation_api_key").await.unwrap().as_deref(),
            Some("AIzaKept")
        );
        assert_eq!(
            store.get("maps_api_key").await.unwrap().as_deref(),
            Some(MAPS_KEY)
        );
    }

    #[tokio::test]
    async fn store_failure_is_persistence_error() {
        let (svc, store) = service(StaticCredentials::none());
        store.fail_writes(true).await;

        let err = svc
            .store(&CredentialPair::new(Some("AIzaKey"), Some(MAPS_KEY)))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Persistence(_)));
        assert!(err.to_string().contains("Unable to store API keys locally"));
        assert!(!err.to_string().contains("AIzaKey"));
    }

    #[tokio::test]
    async fn clear_removes_both_entries() {
        let (svc, _) = service(StaticCredentials::none());
        svc.store(&CredentialPair::new(Some("AIzaKey"), Some(MAPS_KEY)))
            .await
            .unwrap();

        svc.clear().await;

        assert_eq!(svc.resolve().await, CredentialPair::default());
    }

    #[tokio::test]
    async fn clear_does_not_touch_config_layer() {
        let (svc, _) = service(StaticCredentials::new(Some("AIzaCfg"), None));
        svc.clear().await;
        assert_eq!(
            svc.resolve_key(CredentialKind::Generation).await.as_deref(),
            Some("AIzaCfg")
        );
    }

    #[tokio::test]
    async fn clear_swallows_storage_errors() {
        let (svc, store) = service(StaticCredentials::none());
        store.fail_writes(true).await;
        svc.clear().await;
    }

    #[tokio::test]
    async fn read_errors_are_treated_as_absent() {
        let (svc, store) = service(StaticCredentials::new(None, Some(MAPS_KEY)));
        store.fail_reads(true).await;

        let pair = svc.resolve().await;
        assert_eq!(pair.generation_key, None);
        assert_eq!(pair.maps_key.as_deref(), Some(MAPS_KEY));
    }

    #[tokio::test]
    async fn availability_is_stable_between_calls() {
        let (svc, _) = service(StaticCredentials::new(Some("AIzaCfg"), Some(MAPS_KEY)));
        let first = svc.are_available().await;
        let second = svc.are_available().await;
        assert!(first);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn availability_follows_store_and_clear() {
        let (svc, _) = service(StaticCredentials::none());
        assert!(!svc.are_available().await);

        svc.store(&CredentialPair::new(Some("AIzaKey"), Some(MAPS_KEY)))
            .await
            .unwrap();
        assert!(svc.are_available().await);

        svc.clear().await;
        assert!(!svc.are_available().await);
    }

    #[test]
    fn validate_is_pure() {
        let result = CredentialService::validate("", MAPS_KEY);
        assert_eq!(result.errors, vec!["Generation API key is required"]);
        assert!(CredentialService::validate("AIzaKey", MAPS_KEY).valid);
    }
}
