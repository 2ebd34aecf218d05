//! Poster export: SVG composition, PNG rasterization, artwork resolution.

pub mod render;
pub mod svg;


use tracing::warn;

use crate::card::state::ImageRef;

pub use render::{poster_filename, render_poster, ExportError, ExportOptions};

/// Resolve the card's image reference to an embeddable data URI.
///
/// Inline artwork is already a data URI. Remote fallback images are fetched
/// so the rasterizer can embed them; if the fetch fails the poster renders
/// with a styled placeholder panel instead.
pub async fn resolve_artwork(image: &ImageRef) -> Option<String> {
    match image {
        ImageRef::Inline { .. } => image.data_uri(),
        ImageRef::Remote { url } => match fetch_data_uri(url).await {
            Ok(uri) => Some(uri),
            Err(e) => {
                warn!(error = ?e, url, "failed to fetch fallback artwork, rendering placeholder");
                None
            }
        },
    }
}

async fn fetch_data_uri(url: &str) -> anyhow::Result<String> {
    use anyhow::Context;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let response = reqwest::get(url)
        .await
        .context("artwork request failed")?
        .error_for_status()
        .context("artwork request rejected")?;

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    let bytes = response.bytes().await.context("artwork body unreadable")?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
}
