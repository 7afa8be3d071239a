use serde::{Deserialize, Serialize};

/// Fallback text when a reply carries no candidate text.
pub const NO_RESPONSE: &str = "No response.";

// Gemini generateContent models
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateRequest {
    /// A single-turn request carrying only the user's text.
    pub fn user_text(text: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl GenerateResponse {
    /// Text at `candidates[0].content.parts[0].text`, or [`NO_RESPONSE`].
    pub fn reply_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_RESPONSE)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

impl ApiErrorEnvelope {
    /// The `error.message` field of a failure body, if the body has one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
    }
}
