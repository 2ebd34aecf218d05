use async_trait::async_trait;

use crate::ai::error::AiError;
use crate::ai::types::{InlineImage, SpeechAudio};
use crate::card::style::Tone;

/// Trait over the three generative endpoints the studio talks to.
///
/// Implementations return raw API results; fallback substitution on failure
/// happens in the studio layer so every provider gets the same recovery
/// behavior.
#[async_trait]
pub trait CreativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Generate a 30-50 word greeting in the requested tone. The returned
    /// text is expected to be markdown-free prose; it is not trimmed.
    async fn generate_message(
        &self,
        recipient: &str,
        sender: &str,
        tone: Tone,
    ) -> Result<String, AiError>;

    /// Generate 9:16 poster artwork for the requested tone.
    async fn generate_artwork(&self, tone: Tone) -> Result<InlineImage, AiError>;

    /// Synthesize the message text to PCM16 speech audio.
    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, AiError>;
}
