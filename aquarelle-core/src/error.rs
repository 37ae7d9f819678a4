//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::CredentialKind;

// Re-export library error type
pub use aquarelle_provider::ProviderError;

/// Core layer error type
///
/// Messages are shown to users as-is and never contain key material.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required API key is neither configured nor stored
    #[error("{} API key is not available. Please configure your API keys.", .0.label())]
    CredentialsMissing(CredentialKind),

    /// Keys could not be written to the durable mapping
    #[error("Unable to store API keys locally. Please check that local storage is available. ({0})")]
    Persistence(String),

    /// The source image is not a `data:image/...;base64,...` URL
    #[error("Invalid image data URL format ({0}). Expected 'data:image/...;base64,...'")]
    InputFormat(String),

    /// The model answered with text instead of an image
    #[error("The AI model responded with text instead of an image: \"{0}\"")]
    ModelOutput(String),

    /// Generation did not succeed within the attempt budget
    #[error("The AI model failed to generate an image after {attempts} attempts. Details: {message}")]
    GenerationFailed { attempts: u32, message: String },

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing configuration, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::CredentialsMissing(_)
            | Self::InputFormat(_)
            | Self::ModelOutput(_)
            | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
