//! Storage adapters for the durable API key mapping.

mod json_file_store;

pub use json_file_store::JsonFileStore;

#[cfg(feature = "keyring-store")]
mod keyring_store;

#[cfg(feature = "keyring-store")]
pub use keyring_store::KeyringStore;
