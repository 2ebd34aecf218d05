use std::fs;
use std::path::{Path, PathBuf};

use resvg::usvg;
use thiserror::Error;
use tracing::info;

use crate::card::state::CardState;
use crate::export::svg::{compose_svg, CARD_HEIGHT, CARD_WIDTH};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to rasterize poster: {0}")]
    Rasterize(String),

    #[error("failed to write poster: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Multiplier over the 450x800 base canvas. The original exported at 4x.
    pub pixel_ratio: u32,
    pub output_dir: PathBuf,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            pixel_ratio: 4,
            output_dir: output_dir.into(),
        }
    }
}

/// Derive the download filename from the recipient, collapsing every run of
/// whitespace to a single hyphen.
pub fn poster_filename(recipient: &str) -> String {
    let slug: Vec<&str> = recipient.split_whitespace().collect();
    format!("Xmas-Poster-{}.png", slug.join("-"))
}

/// Rasterize the card to a PNG file and return its path.
///
/// `artwork` is the resolved data URI (see [`crate::export::resolve_artwork`]);
/// `None` renders the placeholder panel.
pub fn render_poster(
    card: &CardState,
    artwork: Option<&str>,
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let png = rasterize(card, artwork, options.pixel_ratio)?;

    fs::create_dir_all(&options.output_dir)?;
    let path = options.output_dir.join(poster_filename(&card.recipient));
    fs::write(&path, png)?;

    info!(path = %path.display(), pixel_ratio = options.pixel_ratio, "poster exported");
    Ok(path)
}

/// Rasterize the card to PNG bytes at the requested pixel density.
pub fn rasterize(
    card: &CardState,
    artwork: Option<&str>,
    pixel_ratio: u32,
) -> Result<Vec<u8>, ExportError> {
    let svg = compose_svg(card, artwork);

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opt)
        .map_err(|e| ExportError::Rasterize(format!("svg parse: {e}")))?;

    let ratio = pixel_ratio.max(1);
    let mut pixmap = tiny_skia::Pixmap::new(CARD_WIDTH * ratio, CARD_HEIGHT * ratio)
        .ok_or_else(|| ExportError::Rasterize("could not allocate pixmap".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(ratio as f32, ratio as f32),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| ExportError::Rasterize(format!("png encode: {e}")))
}

/// Spool an exported poster to the platform print service. Best effort: the
/// caller reports failure as a non-fatal note.
pub async fn print_poster(path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let status = tokio::process::Command::new("lp")
        .arg(path)
        .status()
        .await
        .context("failed to invoke print spooler (lp)")?;

    if !status.success() {
        anyhow::bail!("print spooler exited with {status}");
    }
    Ok(())
}
