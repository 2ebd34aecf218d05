//! Remote calls plus the fallback substitution the studio applies on failure.

use tracing::warn;

use crate::ai::prompts::{EMPTY_RESPONSE_MESSAGE, FALLBACK_MESSAGE};
use crate::ai::provider::CreativeProvider;
use crate::ai::types::SpeechAudio;
use crate::card::state::ImageRef;
use crate::card::style::Tone;

/// Fetch a generated greeting. Never fails: a remote failure substitutes the
/// fixed fallback greeting, an empty-but-successful response substitutes the
/// short one. The bool reports whether a fallback was used.
pub async fn fetch_message(
    provider: &dyn CreativeProvider,
    recipient: &str,
    sender: &str,
    tone: Tone,
) -> (String, bool) {
    match provider.generate_message(recipient, sender, tone).await {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                (EMPTY_RESPONSE_MESSAGE.to_string(), true)
            } else {
                (trimmed.to_string(), false)
            }
        }
        Err(e) => {
            warn!(error = ?e, "message generation failed, substituting fallback greeting");
            (FALLBACK_MESSAGE.to_string(), true)
        }
    }
}

/// Fetch generated artwork. Never fails: a remote failure substitutes the
/// fixed per-tone fallback stock image.
pub async fn fetch_artwork(provider: &dyn CreativeProvider, tone: Tone) -> (ImageRef, bool) {
    match provider.generate_artwork(tone).await {
        Ok(image) => (
            ImageRef::Inline {
                mime: image.mime,
                data: image.data,
            },
            false,
        ),
        Err(e) => {
            warn!(error = ?e, %tone, "artwork generation failed, substituting fallback image");
            (ImageRef::remote(tone.fallback_image_url()), true)
        }
    }
}

/// Fetch synthesized speech. There is no fallback audio: failure yields
/// `None` and the poster simply stays silent.
pub async fn fetch_speech(provider: &dyn CreativeProvider, text: &str) -> Option<SpeechAudio> {
    match provider.synthesize_speech(text).await {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!(error = ?e, "speech synthesis failed, no audio produced");
            None
        }
    }
}
