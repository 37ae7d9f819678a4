//! Gemini REST wire types (`generateContent`)

use serde::{Deserialize, Serialize};

use crate::types::{DataUrlError, GenerationOutput, GenerationRequest, ImagePayload};

// ============ Request ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// 图像在前、提示词在后，与官方示例的 part 顺序一致
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: request.image.mime_type.clone(),
                            data: request.image.data_base64(),
                        }),
                    },
                    Part {
                        text: Some(request.prompt.clone()),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: request
                    .response_modalities
                    .iter()
                    .map(|m| m.as_str())
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
}

// ============ Response ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Take the first inline image of the first candidate, else its text.
    pub fn into_output(self) -> Result<GenerationOutput, DataUrlError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
            return ImagePayload::from_base64(&inline.mime_type, &inline.data)
                .map(GenerationOutput::Image);
        }

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if !text.is_empty() {
            return Ok(GenerationOutput::Text(Some(text)));
        }
        Ok(GenerationOutput::Text(
            block_reason.map(|reason| format!("Prompt blocked: {reason}")),
        ))
    }
}

// ============ Errors ============

#[derive(Debug, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

impl GeminiErrorBody {
    /// `details[].reason`（如 `API_KEY_INVALID`）比 `status` 更具体，优先使用
    pub fn most_specific_code(&self) -> Option<String> {
        self.details
            .iter()
            .find_map(|d| d.reason.clone())
            .or_else(|| self.status.clone())
    }
}
