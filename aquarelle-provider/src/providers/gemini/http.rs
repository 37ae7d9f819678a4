//! Gemini HTTP 请求方法

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::join_url;
use crate::traits::{ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{API_KEY_HEADER, GeminiErrorResponse, GeminiProvider};

impl GeminiProvider {
    /// 执行 GET 请求
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = join_url(&self.base_url, path);
        let request = self.client.get(&url).header(API_KEY_HEADER, &self.api_key);

        let (status, text) =
            HttpUtils::execute_request(request, self.provider_name(), "GET", path).await?;
        self.handle_response(status, &text)
    }

    /// 执行 POST 请求（JSON body）
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = join_url(&self.base_url, path);
        let body = serde_json::to_vec(body).map_err(|e| ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })?;
        // 请求体包含完整图像数据，只记录大小
        log::debug!("[{}] Request Body: {} bytes", self.provider_name(), body.len());

        let request = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let (status, text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", path).await?;
        self.handle_response(status, &text)
    }

    fn handle_response<T: DeserializeOwned>(&self, status: u16, text: &str) -> Result<T> {
        if (200..300).contains(&status) {
            return HttpUtils::parse_json(text, self.provider_name());
        }

        let raw = Self::raw_error(status, text);
        log::error!(
            "[{}] API error (HTTP {status}, {}): {}",
            self.provider_name(),
            raw.code.as_deref().unwrap_or("-"),
            raw.message
        );
        Err(self.map_error(raw))
    }

    /// 解析 Gemini 错误响应体；无法解析时保留截断后的原文
    fn raw_error(status: u16, text: &str) -> RawApiError {
        match serde_json::from_str::<GeminiErrorResponse>(text) {
            Ok(resp) => {
                let status = if resp.error.code == 0 {
                    status
                } else {
                    resp.error.code
                };
                match resp.error.most_specific_code() {
                    Some(code) => RawApiError::with_code(code, resp.error.message),
                    None => RawApiError::new(resp.error.message),
                }
                .with_http_status(status)
            }
            Err(_) => RawApiError::new(truncate_for_log(text)).with_http_status(status),
        }
    }
}
