//! Implementation of the `aquarelle keys` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use aquarelle_app::AppState;
use aquarelle_core::error::CoreError;
use aquarelle_core::types::{CredentialKind, CredentialPair, CredentialSource, ValidationResult};
use aquarelle_core::CredentialService;
use aquarelle_provider::log_sanitizer::mask_secret;

use super::{output, CommandOutput};

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// Show which keys are available and where they come from
    Status,

    /// Validate and store both API keys
    Set(SetArgs),

    /// Remove stored API keys (configured keys are unaffected)
    Clear,

    /// Check the generation key against the provider
    Verify,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Gemini API key
    #[arg(long, env = "AQUARELLE_GENERATION_KEY", hide_env_values = true)]
    pub generation_key: Option<String>,

    /// Google Maps API key
    #[arg(long, env = "AQUARELLE_MAPS_KEY", hide_env_values = true)]
    pub maps_key: Option<String>,
}

// ===== status =====

#[derive(Debug, Serialize)]
pub struct KeyStatus {
    pub kind: CredentialKind,
    pub source: CredentialSource,
    /// 仅保留末尾几位
    pub masked: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub available: bool,
    pub keys: Vec<KeyStatus>,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.keys.len() + 1);
        for key in &self.keys {
            let value = key.masked.as_deref().unwrap_or("-");
            lines.push(format!(
                "{:<12} {:<14} {value}",
                key.kind.label(),
                key.source.to_string()
            ));
        }
        lines.push(if self.available {
            "All API keys are available.".to_string()
        } else {
            "API keys are missing. Run `aquarelle keys set`.".to_string()
        });
        lines.join("\n")
    }
}

fn build_status(pair: &CredentialPair, sources: [CredentialSource; 2]) -> StatusOutput {
    let keys = CredentialKind::ALL
        .into_iter()
        .zip(sources)
        .map(|(kind, source)| KeyStatus {
            kind,
            source,
            masked: pair.get(kind).map(mask_secret),
        })
        .collect();
    StatusOutput {
        available: pair.is_complete(),
        keys,
    }
}

// ===== set =====

#[derive(Debug, Serialize)]
pub struct SetOutput {
    #[serde(flatten)]
    pub validation: ValidationResult,
    pub stored: bool,
}

impl CommandOutput for SetOutput {
    fn to_human(&self) -> String {
        if self.stored {
            return "API keys saved.".to_string();
        }
        let mut lines = vec!["API keys were not saved:".to_string()];
        lines.extend(self.validation.errors.iter().map(|e| format!("  - {e}")));
        lines.join("\n")
    }
}

// ===== verify =====

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub provider: &'static str,
    pub valid: bool,
}

impl CommandOutput for VerifyOutput {
    fn to_human(&self) -> String {
        if self.valid {
            format!("The generation key is accepted by {}.", self.provider)
        } else {
            format!("The generation key was rejected by {}.", self.provider)
        }
    }
}

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

impl CommandOutput for Message {
    fn to_human(&self) -> String {
        self.message.to_string()
    }
}

pub async fn execute(command: &KeysCommands, state: &AppState, json_mode: bool) -> Result<()> {
    match command {
        KeysCommands::Status => {
            let pair = state.credential_service.resolve().await;
            let status = state.credential_status().await;
            output(&build_status(&pair, [status.generation, status.maps]), json_mode);
            Ok(())
        }
        KeysCommands::Set(args) => {
            let generation = args.generation_key.as_deref().unwrap_or_default();
            let maps = args.maps_key.as_deref().unwrap_or_default();

            let validation = CredentialService::validate(generation, maps);
            if !validation.valid {
                output(
                    &SetOutput {
                        validation,
                        stored: false,
                    },
                    json_mode,
                );
                anyhow::bail!("Invalid API keys");
            }

            state
                .credential_service
                .store(&CredentialPair::new(Some(generation), Some(maps)))
                .await?;
            output(
                &SetOutput {
                    validation,
                    stored: true,
                },
                json_mode,
            );
            Ok(())
        }
        KeysCommands::Clear => {
            state.credential_service.clear().await;
            output(
                &Message {
                    message: "Stored API keys cleared.",
                },
                json_mode,
            );
            Ok(())
        }
        KeysCommands::Verify => {
            let api_key = state
                .credential_service
                .resolve_key(CredentialKind::Generation)
                .await
                .ok_or(CoreError::CredentialsMissing(CredentialKind::Generation))?;
            let provider = state.ctx.provider_factory().create(&api_key)?;
            let valid = provider
                .validate_credentials()
                .await
                .map_err(CoreError::from)?;

            output(
                &VerifyOutput {
                    provider: provider.id(),
                    valid,
                },
                json_mode,
            );
            if valid {
                Ok(())
            } else {
                anyhow::bail!("Generation API key is invalid")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_masks_keys() {
        let pair = CredentialPair::new(Some("AIzaSyExample1234"), None);
        let status = build_status(&pair, [CredentialSource::Stored, CredentialSource::Missing]);

        assert!(!status.available);
        assert_eq!(status.keys[0].masked.as_deref(), Some("*************1234"));
        assert_eq!(status.keys[1].masked, None);

        let human = status.to_human();
        assert!(!human.contains("AIzaSyExample1234"));
        assert!(human.contains("local storage"));

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("AIzaSyExample1234"));
    }

    #[test]
    fn rejected_set_lists_every_error() {
        let out = SetOutput {
            validation: CredentialService::validate("", "short"),
            stored: false,
        };
        assert_eq!(
            out.to_human(),
            "API keys were not saved:\n  - Generation API key is required\n  - Maps API key appears to be too short"
        );
    }
}
