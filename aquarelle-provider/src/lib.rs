//! # aquarelle-provider
//!
//! Bindings for the hosted services Aquarelle talks to: an image-generation
//! model and the Google Maps JavaScript API loader.
//!
//! ## Supported Providers
//!
//! | Provider | Auth Method |
//! |----------|-------------|
//! | [Google Gemini](https://ai.google.dev/) | `x-goog-api-key` header |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aquarelle_provider::{
//!     create_provider, GenerationOutput, GenerationRequest, ImagePayload, ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Gemini {
//!         api_key: "your-key".to_string(),
//!     })?;
//!
//!     let image = ImagePayload::from_data_url("data:image/png;base64,iVBORw0KGgo=")?;
//!     let request = GenerationRequest::new(image, "Paint this building in watercolour");
//!
//!     match provider.generate(&request).await? {
//!         GenerationOutput::Image(image) => println!("{} bytes", image.data.len()),
//!         GenerationOutput::Text(text) => println!("{text:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Nothing is retried here. [`ProviderError::is_transient`] tells the caller whether
//! a failure was a server-side internal error; only those are worth another attempt.

mod error;
mod factory;
mod http_client;
mod maps;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, create_provider_with_model};

// Re-export core trait only (internal traits are not exported)
pub use traits::ImageProvider;

// Re-export types
pub use types::{
    DataUrlError, GenerationOutput, GenerationRequest, ImagePayload, ProviderCredentials,
    ProviderType, ResponseModality,
};

pub use maps::{MAPS_API_VERSION, MAPS_LIBRARIES, MapsLoader, create_maps_loader};

pub use providers::GeminiProvider;

pub use utils::log_sanitizer;
