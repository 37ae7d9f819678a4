//! 图像生成服务
//!
//! 解析输入图像、解析生成 key，然后调用 Provider。只有服务端内部错误
//! （[`ProviderError::is_transient`](aquarelle_provider::ProviderError::is_transient)）
//! 会按指数退避重试，其余结果立即返回。

use std::sync::Arc;
use std::time::Duration;

use aquarelle_provider::{GenerationOutput, GenerationRequest, ImagePayload};

use crate::error::{CoreError, CoreResult};
use crate::services::{CredentialService, ServiceContext};
use crate::types::CredentialKind;

/// 默认提示词
pub const WATERCOLOR_PROMPT: &str = "Create a traditional watercolor painting of an isometric perspective of this building. Only render the targetted building, don't render any shadows or paper background.";

/// 模型只返回空文本时使用的占位说明
const NO_TEXT_RESPONSE: &str = "No text response received.";

/// 重试策略：第 n 次失败后等待 `base_delay * 2^(n-1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数（含首次）
    pub max_attempts: u32,
    /// 首次重试前的等待时间
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// 第 `attempt` 次（从 1 开始）失败后的等待时间
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }
}

/// 生成参数
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub prompt: String,
    pub retry: RetryPolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            prompt: WATERCOLOR_PROMPT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

/// 图像生成服务
pub struct GenerationService {
    ctx: Arc<ServiceContext>,
    options: GenerationOptions,
}

impl GenerationService {
    /// 创建生成服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, options: GenerationOptions) -> Self {
        Self { ctx, options }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// 把 `data:image/...;base64,...` 形式的源图像转换为水彩渲染图，返回同样格式的 data URL
    pub async fn generate(&self, source: &str) -> CoreResult<String> {
        // 1. 解析输入（失败时不发起任何网络请求）
        let image = ImagePayload::from_data_url(source)
            .map_err(|e| CoreError::InputFormat(e.to_string()))?;

        // 2. 解析 key
        let api_key = CredentialService::new(Arc::clone(&self.ctx))
            .resolve_key(CredentialKind::Generation)
            .await
            .ok_or(CoreError::CredentialsMissing(CredentialKind::Generation))?;

        let provider = self.ctx.provider_factory().create(&api_key)?;
        let request = GenerationRequest::new(image, self.options.prompt.clone());
        let max_attempts = self.options.retry.max_attempts.max(1);

        // 3. 调用，按需重试
        let mut attempt = 0;
        loop {
            attempt += 1;
            log::debug!("[{}] Generation attempt {attempt}/{max_attempts}", provider.id());

            match provider.generate(&request).await {
                Ok(GenerationOutput::Image(image)) => {
                    log::info!(
                        "[{}] Generated image ({}) on attempt {attempt}",
                        provider.id(),
                        image.mime_type
                    );
                    return Ok(image.to_data_url());
                }
                Ok(GenerationOutput::Text(text)) => {
                    let text = text.unwrap_or_else(|| NO_TEXT_RESPONSE.to_string());
                    log::warn!("[{}] Model returned text instead of an image", provider.id());
                    return Err(CoreError::ModelOutput(text));
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.options.retry.delay_for(attempt);
                    log::warn!(
                        "[{}] Attempt {attempt}/{max_attempts} failed: {e}. Retrying in {}ms",
                        provider.id(),
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("[{}] Attempt {attempt}/{max_attempts} failed: {e}", provider.id());
                    } else {
                        log::error!("[{}] Attempt {attempt}/{max_attempts} failed: {e}", provider.id());
                    }
                    return Err(CoreError::GenerationFailed {
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}
