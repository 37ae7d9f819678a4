//! Platform-agnostic application bootstrap for Aquarelle.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter injection).

pub mod adapters;

use std::sync::Arc;

use aquarelle_core::error::{CoreError, CoreResult};
use aquarelle_core::services::{
    CredentialService, GenerationOptions, GenerationService, MapsService, ServiceContext,
};
use aquarelle_core::traits::{CredentialStore, DefaultImageProviderFactory, ImageProviderFactory};
use aquarelle_core::types::{CredentialStatus, StaticCredentials};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// API key resolution and persistence
    pub credential_service: CredentialService,
    /// Image generation
    pub generation_service: GenerationService,
    /// Maps loader
    pub maps_service: MapsService,
}

impl AppState {
    /// Which layer each key currently comes from.
    pub async fn credential_status(&self) -> CredentialStatus {
        self.credential_service.status().await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `credential_store`: where stored keys live
///
/// # Optional
/// - `static_credentials`: defaults to none (nothing configured)
/// - `provider_factory`: defaults to `DefaultImageProviderFactory`
/// - `generation_options`: defaults to the watercolour prompt and 3 attempts
pub struct AppStateBuilder {
    static_credentials: StaticCredentials,
    credential_store: Option<Arc<dyn CredentialStore>>,
    provider_factory: Option<Arc<dyn ImageProviderFactory>>,
    generation_options: GenerationOptions,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            static_credentials: StaticCredentials::none(),
            credential_store: None,
            provider_factory: None,
            generation_options: GenerationOptions::default(),
        }
    }

    #[must_use]
    pub fn static_credentials(mut self, credentials: StaticCredentials) -> Self {
        self.static_credentials = credentials;
        self
    }

    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    #[must_use]
    pub fn provider_factory(mut self, factory: Arc<dyn ImageProviderFactory>) -> Self {
        self.provider_factory = Some(factory);
        self
    }

    #[must_use]
    pub fn generation_options(mut self, options: GenerationOptions) -> Self {
        self.generation_options = options;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let credential_store = self.credential_store.ok_or_else(|| {
            CoreError::ValidationError("credential_store is required".to_string())
        })?;
        let provider_factory = self
            .provider_factory
            .unwrap_or_else(|| Arc::new(DefaultImageProviderFactory::new()));

        let ctx = Arc::new(ServiceContext::new(
            self.static_credentials,
            credential_store,
            provider_factory,
        ));

        Ok(AppState {
            credential_service: CredentialService::new(Arc::clone(&ctx)),
            generation_service: GenerationService::new(Arc::clone(&ctx), self.generation_options),
            maps_service: MapsService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
