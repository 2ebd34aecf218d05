pub mod error;
pub mod gemini;
pub mod mock;
pub mod prompts;
pub mod provider;
pub mod types;

pub use error::AiError;
pub use gemini::{GeminiConfig, GeminiProvider};
pub use provider::CreativeProvider;
pub use types::*;
