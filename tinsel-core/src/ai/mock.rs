use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::ai::error::AiError;
use crate::ai::provider::CreativeProvider;
use crate::ai::types::{InlineImage, SpeechAudio};
use crate::card::style::Tone;

/// Mock behavior for the mock provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MockBehavior {
    /// Return successful canned responses
    #[default]
    Success,
    /// Return a retryable error N times, then succeed
    RetryableErrorThenSuccess { remaining_errors: usize },
    /// Always return a retryable error
    AlwaysRetryableError,
    /// Always return a terminal error
    AlwaysTerminalError,
    /// Succeed with whitespace-only message text
    EmptyText,
}

/// Canned speech payload: four PCM16 samples (0, 16384, -16384, -32768).
fn mock_speech_payload() -> String {
    let samples: [i16; 4] = [0, 16_384, -16_384, i16::MIN];
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    STANDARD.encode(bytes)
}

/// Mock creative provider for testing
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    call_count: Arc<Mutex<usize>>,
    captured_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            call_count: Arc::new(Mutex::new(0)),
            captured_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_captured_prompts(&self) -> Vec<String> {
        self.captured_prompts.lock().unwrap().clone()
    }

    fn record(&self, prompt: String) -> Result<(), AiError> {
        self.captured_prompts.lock().unwrap().push(prompt);
        *self.call_count.lock().unwrap() += 1;

        let effective = self.behavior.lock().unwrap().clone();
        match effective {
            MockBehavior::RetryableErrorThenSuccess {
                mut remaining_errors,
            } => {
                if remaining_errors > 0 {
                    remaining_errors -= 1;
                    self.set_behavior(MockBehavior::RetryableErrorThenSuccess { remaining_errors });
                    Err(AiError::Retryable(anyhow::anyhow!(
                        "Mock retryable error (remaining: {})",
                        remaining_errors
                    )))
                } else {
                    Ok(())
                }
            }
            MockBehavior::AlwaysRetryableError => Err(AiError::Retryable(anyhow::anyhow!(
                "Mock retryable error (always fails)"
            ))),
            MockBehavior::AlwaysTerminalError => Err(AiError::Terminal(anyhow::anyhow!(
                "Mock terminal error"
            ))),
            MockBehavior::Success | MockBehavior::EmptyText => Ok(()),
        }
    }

    fn is_empty_text(&self) -> bool {
        matches!(*self.behavior.lock().unwrap(), MockBehavior::EmptyText)
    }
}

#[async_trait]
impl CreativeProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_message(
        &self,
        recipient: &str,
        sender: &str,
        tone: Tone,
    ) -> Result<String, AiError> {
        self.record(format!("message:{recipient}:{sender}:{tone}"))?;

        if self.is_empty_text() {
            return Ok("   ".to_string());
        }
        Ok(format!(
            "A mock festive greeting for {recipient}, with love from {sender}."
        ))
    }

    async fn generate_artwork(&self, tone: Tone) -> Result<InlineImage, AiError> {
        self.record(format!("artwork:{tone}"))?;

        Ok(InlineImage {
            mime: "image/png".to_string(),
            // Smallest well-formed payload the export path will accept.
            data: STANDARD.encode(b"mock-png-bytes"),
        })
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, AiError> {
        self.record(format!("speech:{text}"))?;

        Ok(SpeechAudio {
            data: mock_speech_payload(),
            sample_rate: 24_000,
        })
    }
}
