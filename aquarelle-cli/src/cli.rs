//! CLI type definitions
//!
//! Clap command structures that define the `aquarelle` interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::keys::KeysCommands;
use crate::commands::paint::PaintArgs;
use crate::config::StoreKind;

#[derive(Parser, Debug)]
#[command(name = "aquarelle")]
#[command(about = "Aquarelle - watercolour renderings of buildings from map imagery", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to <config dir>/aquarelle/config.json)
    #[arg(long, global = true, env = "AQUARELLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where stored API keys live
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreKind>,

    /// Credentials file used by the `file` store
    #[arg(long, global = true)]
    pub store_path: Option<PathBuf>,

    /// Generation model to call
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// API key management commands
    #[command(subcommand)]
    Keys(KeysCommands),

    /// Render an image file as a watercolour painting
    Paint(PaintArgs),

    /// Print the Maps JavaScript API bootstrap URL
    MapsUrl,
}
