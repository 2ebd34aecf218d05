use anyhow::anyhow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Retryable error: {0}")]
    Retryable(anyhow::Error),

    #[error("Terminal error: {0}")]
    Terminal(anyhow::Error),
}

impl AiError {
    /// Classify an HTTP error status. Throttling and server-side failures are
    /// worth retrying; everything else (bad request, auth) is terminal.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let err = anyhow!("API error {status}: {body}");
        if status.as_u16() == 429 || status.is_server_error() {
            AiError::Retryable(err)
        } else {
            AiError::Terminal(err)
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_timeout() || source.is_connect() {
            AiError::Retryable(anyhow!(source))
        } else {
            AiError::Terminal(anyhow!(source))
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(source: serde_json::Error) -> Self {
        Self::Terminal(anyhow!(source))
    }
}
