use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{GenerationOutput, GenerationRequest};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码（如可用）
    pub http_status: Option<u16>,
    /// 错误码（Gemini 为 `INTERNAL` / `INVALID_ARGUMENT` 等状态字符串）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 图像生成 Provider Trait
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    ///
    /// Returns `Ok(false)` when the provider rejects the key, `Err` for anything
    /// that prevents an answer (network, server failure).
    async fn validate_credentials(&self) -> Result<bool>;

    /// 执行一次生成调用（不含重试）
    ///
    /// A successful HTTP exchange always yields `Ok`, even if the model answered
    /// with text only; deciding what a text-only answer means is left to the caller.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput>;
}
