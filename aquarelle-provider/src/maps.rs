//! Google Maps JavaScript API loader configuration.
//!
//! A [`MapsLoader`] is a plain value built per request from a key; there is no
//! process-wide loader instance.

use crate::error::{ProviderError, Result};

/// Script bootstrap endpoint of the Maps JavaScript API.
pub const MAPS_BOOTSTRAP_URL: &str = "https://maps.googleapis.com/maps/api/js";
/// API channel requested by the loader.
pub const MAPS_API_VERSION: &str = "beta";
/// Libraries loaded alongside the core map.
pub const MAPS_LIBRARIES: [&str; 3] = ["places", "marker", "geocoding"];

/// Loader settings for the Maps JavaScript API.
#[derive(Clone, PartialEq, Eq)]
pub struct MapsLoader {
    api_key: String,
    version: &'static str,
    libraries: Vec<&'static str>,
}

// 不在 Debug 输出中暴露密钥
impl std::fmt::Debug for MapsLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsLoader")
            .field("api_key", &"<redacted>")
            .field("version", &self.version)
            .field("libraries", &self.libraries)
            .finish()
    }
}

impl MapsLoader {
    pub fn version(&self) -> &str {
        self.version
    }

    pub fn libraries(&self) -> &[&'static str] {
        &self.libraries
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Script URL that bootstraps the Maps JavaScript API with these settings.
    ///
    /// The returned URL embeds the key; treat it as a secret.
    pub fn bootstrap_url(&self) -> String {
        format!(
            "{MAPS_BOOTSTRAP_URL}?key={}&v={}&libraries={}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(self.version),
            urlencoding::encode(&self.libraries.join(","))
        )
    }
}

/// Build a loader for the given key.
pub fn create_maps_loader(api_key: impl Into<String>) -> Result<MapsLoader> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
        return Err(ProviderError::InvalidCredentials {
            provider: "google-maps".to_string(),
            raw_message: Some("Maps API key is empty".to_string()),
        });
    }

    Ok(MapsLoader {
        api_key: api_key.trim().to_string(),
        version: MAPS_API_VERSION,
        libraries: MAPS_LIBRARIES.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_uses_beta_with_fixed_libraries() {
        let loader = create_maps_loader("maps-key-0123456789-0123456789").unwrap();
        assert_eq!(loader.version(), "beta");
        assert_eq!(loader.libraries(), &["places", "marker", "geocoding"]);
    }

    #[test]
    fn bootstrap_url_encodes_parameters() {
        let loader = create_maps_loader("key with space").unwrap();
        assert_eq!(
            loader.bootstrap_url(),
            "https://maps.googleapis.com/maps/api/js?key=key%20with%20space&v=beta&libraries=places%2Cmarker%2Cgeocoding"
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            create_maps_loader("   "),
            Err(ProviderError::InvalidCredentials { .. })
        ));
    }

    #[test]
    fn debug_hides_key() {
        let loader = create_maps_loader("secret-maps-key").unwrap();
        assert!(!format!("{loader:?}").contains("secret-maps-key"));
    }
}
