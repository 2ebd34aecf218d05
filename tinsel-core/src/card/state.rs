use serde::{Deserialize, Serialize};

use crate::card::style::{FrameStyle, SealKind, Tone};

/// Reference to the artwork shown on the poster.
///
/// Generated artwork arrives inline as base64 from the image endpoint;
/// fallback artwork is a remote stock image URL that is only fetched when the
/// poster is exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Inline { mime: String, data: String },
    Remote { url: String },
}

impl ImageRef {
    pub fn remote(url: impl Into<String>) -> Self {
        ImageRef::Remote { url: url.into() }
    }

    /// Data URI for inline artwork, `None` for remote references.
    pub fn data_uri(&self) -> Option<String> {
        match self {
            ImageRef::Inline { mime, data } => Some(format!("data:{mime};base64,{data}")),
            ImageRef::Remote { .. } => None,
        }
    }
}

/// The full editable state of the poster.
///
/// The four busy flags mirror the in-flight generation requests. They are
/// independent: a text request and an image request may be outstanding at the
/// same time, and nothing serializes repeated requests of the same kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardState {
    pub recipient: String,
    pub sender: String,
    pub tone: Tone,
    pub frame: FrameStyle,
    pub seal: SealKind,
    pub message: String,
    pub image: ImageRef,

    /// Base64 PCM16 payload from the most recent speech synthesis, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,

    #[serde(default)]
    pub generating_text: bool,
    #[serde(default)]
    pub generating_image: bool,
    #[serde(default)]
    pub generating_speech: bool,
    #[serde(default)]
    pub exporting: bool,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            recipient: "Dear Mom & Dad".to_string(),
            sender: "Your Loving Daughter".to_string(),
            tone: Tone::Heartfelt,
            frame: FrameStyle::Classic,
            seal: SealKind::None,
            message: "May the magic and the wonder of the holiday season stay with you \
                      throughout the coming year. You are the heart of our family, and I wish \
                      you a Christmas filled with endless joy and peace."
                .to_string(),
            image: ImageRef::remote(Tone::Heartfelt.fallback_image_url()),
            audio: None,
            generating_text: false,
            generating_image: false,
            generating_speech: false,
            exporting: false,
        }
    }
}

impl CardState {
    /// True while any generation or export request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.generating_text || self.generating_image || self.generating_speech || self.exporting
    }
}
