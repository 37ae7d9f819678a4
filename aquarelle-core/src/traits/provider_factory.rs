//! Image provider factory Trait

use std::sync::Arc;

use aquarelle_provider::{create_provider_with_model, ImageProvider, ProviderCredentials};

use crate::error::CoreResult;

/// Builds an [`ImageProvider`] for a resolved API key.
///
/// Providers are created per call because the key may change between calls
/// (stored, cleared, replaced). Tests inject scripted providers through this seam.
pub trait ImageProviderFactory: Send + Sync {
    /// Create a provider authenticated with `api_key`
    fn create(&self, api_key: &str) -> CoreResult<Arc<dyn ImageProvider>>;
}

/// Gemini-backed factory.
#[derive(Debug, Clone)]
pub struct DefaultImageProviderFactory {
    model: Option<String>,
}

impl DefaultImageProviderFactory {
    /// Use the provider's default model
    #[must_use]
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Call `model` instead of the default one
    #[must_use]
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }
}

impl Default for DefaultImageProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProviderFactory for DefaultImageProviderFactory {
    fn create(&self, api_key: &str) -> CoreResult<Arc<dyn ImageProvider>> {
        let credentials = ProviderCredentials::Gemini {
            api_key: api_key.to_string(),
        };
        let provider = match &self.model {
            Some(model) => create_provider_with_model(credentials, model)?,
            None => aquarelle_provider::create_provider(credentials)?,
        };
        Ok(provider)
    }
}
