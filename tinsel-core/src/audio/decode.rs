use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode a base64 PCM16 speech payload to normalized f32 samples.
///
/// An empty payload decodes to an empty sample sequence; playback of nothing
/// is skipped upstream without surfacing an error. A trailing odd byte is
/// ignored.
pub fn decode_pcm16_base64(payload: &str) -> Result<Vec<f32>> {
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = STANDARD
        .decode(payload)
        .context("invalid base64 audio payload")?;
    Ok(pcm16_to_f32(&bytes))
}

/// Reinterpret little-endian byte pairs as signed 16-bit samples normalized
/// to [-1.0, 1.0].
pub fn pcm16_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| {
            let sample = i16::from_le_bytes([pair[0], pair[1]]);
            sample as f32 / 32768.0
        })
        .collect()
}
