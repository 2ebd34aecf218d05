use serde::{Deserialize, Serialize};

/// Inline artwork returned by the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime: String,
    /// Base64-encoded image bytes, as delivered by the API.
    pub data: String,
}

/// Synthesized speech returned by the TTS endpoint.
///
/// `data` is an opaque base64 string of signed 16-bit little-endian PCM
/// samples, single channel, at `sample_rate` Hz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechAudio {
    pub data: String,
    pub sample_rate: u32,
}
