use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ai::mock::MockBehavior;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "gemini")]
    Gemini {
        api_key: String,
        #[serde(default = "default_text_model")]
        text_model: String,
        #[serde(default = "default_image_model")]
        image_model: String,
        #[serde(default = "default_speech_model")]
        speech_model: String,
    },
    #[serde(rename = "mock")]
    Mock {
        #[serde(default)]
        behavior: MockBehavior,
    },
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Pixel density multiplier over the 450x800 base canvas.
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: u32,

    /// Where exported posters land. Defaults to the current directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_pixel_ratio() -> u32 {
    4
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pixel_ratio: default_pixel_ratio(),
            output_dir: None,
        }
    }
}

impl ExportSettings {
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Prebuilt voice name passed to the speech endpoint.
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_voice() -> String {
    "Kore".to_string()
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice: default_voice(),
        }
    }
}

/// Settings persisted at `~/.tinsel/settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Name of the provider used when the session hasn't picked one.
    #[serde(default)]
    pub active_provider: Option<String>,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub speech: SpeechSettings,
}

impl Settings {
    pub fn active_provider(&self) -> Option<&ProviderConfig> {
        let name = self.active_provider.as_ref()?;
        self.providers.get(name)
    }
}
