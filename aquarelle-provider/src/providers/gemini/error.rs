//! Gemini 错误映射
//!
//! Gemini 使用 google.rpc 状态码（`INTERNAL`、`INVALID_ARGUMENT` 等），
//! `details[].reason` 中可能带有更具体的原因（如 `API_KEY_INVALID`）。

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::GeminiProvider;

impl ProviderErrorMapper for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        let provider = self.provider_name().to_string();

        match raw.code.as_deref() {
            Some("INTERNAL") => ProviderError::InternalError {
                provider,
                status: raw.http_status,
                raw_message: raw.message,
            },
            Some("API_KEY_INVALID" | "API_KEY_EXPIRED" | "UNAUTHENTICATED") => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }
            Some("PERMISSION_DENIED" | "API_KEY_SERVICE_BLOCKED") => {
                ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                }
            }
            Some("RESOURCE_EXHAUSTED") => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            Some("INVALID_ARGUMENT" | "FAILED_PRECONDITION" | "OUT_OF_RANGE") => {
                ProviderError::InvalidParameter {
                    provider,
                    param: "request".to_string(),
                    detail: raw.message,
                }
            }
            // 无法识别的状态码：退回到 HTTP 状态判断
            _ => match raw.http_status {
                Some(500) => ProviderError::InternalError {
                    provider,
                    status: raw.http_status,
                    raw_message: raw.message,
                },
                Some(401) => ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                },
                Some(403) => ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                },
                _ => self.unknown_error(RawApiError {
                    code: raw
                        .code
                        .or_else(|| raw.http_status.map(|s| s.to_string())),
                    ..raw
                }),
            },
        }
    }
}
