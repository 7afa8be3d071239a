use crate::llm::{ChatError, GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::env;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Runtime settings resolved once at startup.
///
/// A missing API key is not an error here; it only matters when a
/// transport is built from this configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_empty(API_KEY_VAR),
            model: non_empty(MODEL_VAR).unwrap_or(defaults.model),
            base_url: non_empty(BASE_URL_VAR).unwrap_or(defaults.base_url),
        }
    }

    /// Apply a model chosen on the command line.
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    pub fn build_client(&self) -> Result<GeminiClient, ChatError> {
        GeminiClient::from_config(self)
    }
}
