//! Decoding and playback of speech payloads, plus the notification chime.
//!
//! The speech endpoint returns raw base64 PCM16 mono at 24 kHz. Payloads are
//! decoded to normalized f32 samples and written through a shared cpal output
//! stream, resampled to whatever rate the device actually runs at.

pub mod chime;
pub mod decode;
pub mod playback;

#[cfg(test)]
mod tests;

/// Sample rate of every payload the speech endpoint produces.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
