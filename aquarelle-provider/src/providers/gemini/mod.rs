//! Google Gemini image-generation provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{GenerateContentRequest, GenerateContentResponse, GeminiErrorResponse};

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// 默认使用的图像生成模型
pub(crate) const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Gemini 标准 API key 请求头
pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini provider
pub struct GeminiProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
}

impl GeminiProvider {
    /// Create a provider for the default model and the public endpoint.
    pub fn new(api_key: String) -> Result<Self> {
        Ok(Self {
            client: create_http_client("gemini")?,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Use another model. A leading `models/` prefix is accepted.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = model
            .strip_prefix("models/")
            .map_or_else(|| model.clone(), str::to_string);
        self
    }

    /// Point the provider at another endpoint (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Model this provider calls.
    pub fn model(&self) -> &str {
        &self.model
    }
}
