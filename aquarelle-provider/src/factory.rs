//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::GeminiProvider;
use crate::traits::ImageProvider;
use crate::types::ProviderCredentials;

/// Creates an [`ImageProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn ImageProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use aquarelle_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Gemini {
///     api_key: "your-key".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn ImageProvider>> {
    match credentials {
        ProviderCredentials::Gemini { api_key } => Ok(Arc::new(GeminiProvider::new(api_key)?)),
    }
}

/// Like [`create_provider`], calling `model` instead of the provider default.
pub fn create_provider_with_model(
    credentials: ProviderCredentials,
    model: &str,
) -> Result<Arc<dyn ImageProvider>> {
    match credentials {
        ProviderCredentials::Gemini { api_key } => {
            Ok(Arc::new(GeminiProvider::new(api_key)?.with_model(model)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_gemini_provider() {
        let provider = create_provider(ProviderCredentials::Gemini {
            api_key: "AIzaTest".to_string(),
        })
        .unwrap();
        assert_eq!(provider.id(), "gemini");
    }
}
