//! Implementation of the `aquarelle paint` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use aquarelle_app::AppState;
use aquarelle_core::types::ImagePayload;

use super::{output, CommandOutput};

#[derive(Args, Debug)]
pub struct PaintArgs {
    /// Source image (png, jpeg, webp, gif, heic)
    pub input: PathBuf,

    /// Output file (defaults to <input>.watercolor.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// MIME type of the input, when the extension is not enough
    #[arg(long)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintOutput {
    pub output: PathBuf,
    pub mime_type: String,
    pub bytes: usize,
}

impl CommandOutput for PaintOutput {
    fn to_human(&self) -> String {
        format!(
            "Saved watercolour ({}, {} bytes) to {}",
            self.mime_type,
            self.bytes,
            self.output.display()
        )
    }
}

/// 根据扩展名推断图像 MIME 类型
fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

fn extension_for(mime_type: &str) -> &str {
    match mime_type {
        "image/jpeg" => "jpg",
        other => other.strip_prefix("image/").unwrap_or("img"),
    }
}

fn default_output(input: &Path, mime_type: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}.watercolor.{}", extension_for(mime_type)))
}

pub async fn execute(args: &PaintArgs, state: &AppState, json_mode: bool) -> Result<()> {
    let mime_type = match &args.mime_type {
        Some(mime) => mime.as_str(),
        None => mime_type_for(&args.input).with_context(|| {
            format!(
                "Cannot tell the image type of {}; pass --mime-type",
                args.input.display()
            )
        })?,
    };

    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let source = ImagePayload::new(mime_type, bytes).to_data_url();

    tracing::info!("Painting {}", args.input.display());
    let result = state.generation_service.generate(&source).await?;
    let image = ImagePayload::from_data_url(&result).context("Model returned an unreadable image")?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, &image.mime_type));
    tokio::fs::write(&output_path, &image.data)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    output(
        &PaintOutput {
            output: output_path,
            bytes: image.data.len(),
            mime_type: image.mime_type,
        },
        json_mode,
    );
    Ok(())
}
