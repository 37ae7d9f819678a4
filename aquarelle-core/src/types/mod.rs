//! 类型定义模块

mod credential;
mod validation;

pub use credential::{
    normalize_key, CredentialKind, CredentialPair, CredentialSource, CredentialStatus,
    StaticCredentials, GENERATION_KEY_ENV, MAPS_KEY_ENV,
};
pub use validation::{validate_keys, ValidationResult, GENERATION_KEY_PREFIX, MAPS_KEY_MIN_LENGTH};

// Re-export provider 库的公共类型
pub use aquarelle_provider::{GenerationOutput, GenerationRequest, ImagePayload, MapsLoader};
