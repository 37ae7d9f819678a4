//! Shared request/response types used by every provider implementation.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============ Provider Types ============

/// Identifies which image-generation provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Google Gemini (`generateContent` REST API).
    Gemini,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// Authentication material for a provider.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// ```json
/// { "provider": "gemini", "credentials": { "api_key": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Gemini API key credentials.
    #[serde(rename = "gemini")]
    Gemini {
        /// Gemini API key (`AI...`).
        api_key: String,
    },
}

impl ProviderCredentials {
    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Gemini { .. } => ProviderType::Gemini,
        }
    }
}

// 不在 Debug 输出中暴露密钥
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini { .. } => f
                .debug_struct("Gemini")
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

// ============ Image Payload ============

/// Reasons a data URL could not be turned into an [`ImagePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("expected a 'data:' URL")]
    MissingScheme,

    /// No `;base64,` separator between the MIME type and the payload.
    #[error("expected 'data:image/...;base64,...'")]
    NotBase64,

    /// The declared MIME type is not an `image/<subtype>` type.
    #[error("unsupported MIME type '{0}', expected image/<subtype>")]
    InvalidMimeType(String),

    /// The payload is not valid standard base64.
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// A self-describing image: declared MIME type plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Decoded image bytes.
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parse a `data:image/<subtype>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, DataUrlError> {
        let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUrlError::NotBase64)?;

        if !is_image_mime_type(mime_type) {
            return Err(DataUrlError::InvalidMimeType(mime_type.to_string()));
        }

        let data = STANDARD
            .decode(payload.trim_end())
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?;

        Ok(Self::new(mime_type, data))
    }

    /// Decode an already split MIME type and base64 payload (provider wire format).
    pub fn from_base64(mime_type: &str, payload: &str) -> Result<Self, DataUrlError> {
        let data = STANDARD
            .decode(payload)
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?;
        Ok(Self::new(mime_type, data))
    }

    /// Base64 (standard alphabet, padded) encoding of the image bytes.
    pub fn data_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Render as `data:<mime>;base64,<payload>`.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64())
    }
}

/// `image/` followed by one or more word characters.
fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type.strip_prefix("image/").is_some_and(|subtype| {
        !subtype.is_empty()
            && subtype
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

// ============ Generation ============

/// Response modalities requested from a generation model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseModality {
    Image,
    Text,
}

impl ResponseModality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
        }
    }
}

/// A single image-to-image generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Source image sent inline with the request.
    pub image: ImagePayload,
    /// Instruction describing the desired transformation.
    pub prompt: String,
    /// Modalities the model may answer with.
    pub response_modalities: Vec<ResponseModality>,
}

impl GenerationRequest {
    /// Request both image and text modalities.
    pub fn new(image: ImagePayload, prompt: impl Into<String>) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            response_modalities: vec![ResponseModality::Image, ResponseModality::Text],
        }
    }
}

/// What the model produced for a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    /// An inline image part (preferred when present).
    Image(ImagePayload),
    /// Text only; the model refused or described instead of drawing.
    Text(Option<String>),
}
