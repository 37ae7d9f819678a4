//! Implementation of the `aquarelle maps-url` command.

use anyhow::Result;
use serde::Serialize;

use aquarelle_app::AppState;

use super::{output, CommandOutput};

#[derive(Debug, Serialize)]
pub struct MapsUrlOutput {
    pub version: String,
    pub libraries: Vec<&'static str>,
    pub url: String,
}

impl CommandOutput for MapsUrlOutput {
    fn to_human(&self) -> String {
        self.url.clone()
    }
}

pub async fn execute(state: &AppState, json_mode: bool) -> Result<()> {
    let loader = state.maps_service.loader().await?;
    output(
        &MapsUrlOutput {
            version: loader.version().to_string(),
            libraries: loader.libraries().to_vec(),
            url: loader.bootstrap_url(),
        },
        json_mode,
    );
    Ok(())
}
