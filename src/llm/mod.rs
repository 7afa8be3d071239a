mod gemini;
mod models;

pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

use async_trait::async_trait;
use thiserror::Error;

pub const MISSING_KEY_MESSAGE: &str = "Gemini API key not found.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Gemini API key not found.")]
    MissingApiKey,

    #[error("Gemini API error: {status}")]
    Api {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    #[error("{0}")]
    Http(#[source] reqwest::Error),

    #[error("Failed to parse Gemini API response: {0}")]
    Decode(String),

    #[error("Request interrupted: {0}")]
    Interrupted(String),
}

impl From<reqwest::Error> for ChatError {
    // Request URLs never reach error records or logs.
    fn from(err: reqwest::Error) -> Self {
        ChatError::Http(err.without_url())
    }
}

impl ChatError {
    /// The text shown to the user in an error record.
    ///
    /// Prefers the message carried by the API's failure payload, then the
    /// error's own description.
    pub fn user_message(&self) -> String {
        let message = match self {
            ChatError::MissingApiKey => MISSING_KEY_MESSAGE.to_string(),
            ChatError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// One request, one reply. No retries, no streaming.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, text: &str) -> Result<String, ChatError>;

    fn model_name(&self) -> &str;
}
