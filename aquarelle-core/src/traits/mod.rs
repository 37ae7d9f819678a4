//! Storage and provider abstraction trait definition

mod credential_store;
mod provider_factory;

pub use credential_store::{CredentialStore, InMemoryCredentialStore};
pub use provider_factory::{DefaultImageProviderFactory, ImageProviderFactory};

// Re-export provider 库的核心 trait
pub use aquarelle_provider::ImageProvider;
