//! Aquarelle Core Library
//!
//! Core logic shared by every Aquarelle front end:
//! - API key resolution, validation and persistence (Credential Service)
//! - Image generation with bounded retry (Generation Service)
//! - Maps loader construction (Maps Service)
//!
//! Storage and provider construction are abstracted through traits, so the
//! platform layer decides where keys live and which HTTP backend is used.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{
    CredentialService, GenerationOptions, GenerationService, MapsService, RetryPolicy,
    ServiceContext,
};
pub use traits::{
    CredentialStore, DefaultImageProviderFactory, ImageProviderFactory, InMemoryCredentialStore,
};
pub use types::{
    CredentialKind, CredentialPair, CredentialSource, CredentialStatus, StaticCredentials,
    ValidationResult,
};
