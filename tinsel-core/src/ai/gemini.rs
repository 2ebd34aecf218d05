//! Gemini `generateContent` client for text, artwork, and speech.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::error::AiError;
use crate::ai::prompts;
use crate::ai::provider::CreativeProvider;
use crate::ai::types::{InlineImage, SpeechAudio};
use crate::card::style::Tone;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fallback when the TTS response carries no rate hint in its mime type.
const DEFAULT_SPEECH_RATE: u32 = 24_000;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub speech_model: String,
    pub voice: String,
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::from_status(status, body));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CreativeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate_message(
        &self,
        recipient: &str,
        sender: &str,
        tone: Tone,
    ) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompts::message_prompt(
                recipient, sender, tone,
            ))],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.9),
                top_p: Some(0.95),
                ..GenerationConfig::default()
            }),
        };

        let response = self
            .generate_content(&self.config.text_model, request)
            .await?;
        response
            .first_text()
            .ok_or_else(|| AiError::Terminal(anyhow::anyhow!("No text part in response")))
    }

    async fn generate_artwork(&self, tone: Tone) -> Result<InlineImage, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompts::artwork_prompt(tone))],
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: prompts::ARTWORK_ASPECT_RATIO.to_string(),
                }),
                ..GenerationConfig::default()
            }),
        };

        let response = self
            .generate_content(&self.config.image_model, request)
            .await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| AiError::Terminal(anyhow::anyhow!("No image data in response")))?;

        Ok(InlineImage {
            mime: inline.mime_type.clone(),
            data: inline.data.clone(),
        })
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(text.to_string())],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.config.voice.clone(),
                        },
                    },
                }),
                ..GenerationConfig::default()
            }),
        };

        let response = self
            .generate_content(&self.config.speech_model, request)
            .await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| AiError::Terminal(anyhow::anyhow!("No audio data in response")))?;

        Ok(SpeechAudio {
            data: inline.data.clone(),
            sample_rate: sample_rate_from_mime(&inline.mime_type),
        })
    }
}

/// The TTS endpoint reports its encoding as e.g. `audio/L16;codec=pcm;rate=24000`.
fn sample_rate_from_mime(mime: &str) -> u32 {
    mime.split(';')
        .filter_map(|part| part.trim().strip_prefix("rate="))
        .find_map(|rate| rate.parse().ok())
        .unwrap_or(DEFAULT_SPEECH_RATE)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    fn first_text(&self) -> Option<String> {
        self.parts().find_map(|p| p.text.clone())
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
