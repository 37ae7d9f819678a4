//! Gemini `ImageProvider` 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{ImageProvider, ProviderErrorMapper};
use crate::types::{GenerationOutput, GenerationRequest};

use super::{GenerateContentRequest, GenerateContentResponse, GeminiProvider};

#[async_trait]
impl ImageProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let path = format!("models/{}", self.model);
        match self.get_json::<serde_json::Value>(&path).await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. }) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        let path = format!("models/{}:generateContent", self.model);
        let body = GenerateContentRequest::from_request(request);

        let response: GenerateContentResponse = self.post_json(&path, &body).await?;
        let output = response.into_output().map_err(|e| self.parse_error(e))?;

        match &output {
            GenerationOutput::Image(image) => log::info!(
                "[gemini] Received image data ({}), {} bytes",
                image.mime_type,
                image.data.len()
            ),
            GenerationOutput::Text(_) => log::warn!("[gemini] Model returned no image"),
        }
        Ok(output)
    }
}
