//! Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod gemini;

pub use gemini::GeminiProvider;
