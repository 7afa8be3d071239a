use super::models::{ApiErrorEnvelope, GenerateRequest, GenerateResponse};
use super::{ChatError, Transport};
use crate::config::Config;
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from loaded configuration. Fails when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self, ChatError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ChatError::MissingApiKey)?;

        Ok(Self::new(api_key)
            .with_model(&config.model)
            .with_base_url(&config.base_url))
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<GenerateResponse, ChatError> {
        debug!(model = %self.model, "sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(%status, "Gemini API returned an error");
            return Err(ChatError::Api {
                status,
                message: ApiErrorEnvelope::message_from(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| ChatError::Decode(err.to_string()))
    }
}

#[async_trait]
impl Transport for GeminiClient {
    async fn send(&self, text: &str) -> Result<String, ChatError> {
        let request = GenerateRequest::user_text(text);
        let response = self.send_request(&request).await?;
        Ok(response.reply_text().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::NO_RESPONSE;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-pro-latest:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key").with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn test_send_extracts_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({ "contents": [{ "parts": [{ "text": "2+2" }] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "The answer is $$4$$." }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).send("2+2").await.unwrap();
        assert_eq!(reply, "The answer is $$4$$.");
    }

    #[tokio::test]
    async fn test_send_falls_back_when_text_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let reply = client_for(&server).send("hello").await.unwrap();
        assert_eq!(reply, NO_RESPONSE);
    }

    #[tokio::test]
    async fn test_send_surfaces_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Api { status, .. } if status.as_u16() == 400));
        assert_eq!(err.user_message(), "API key not valid.");
    }

    #[tokio::test]
    async fn test_send_uses_configured_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "flash" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_model("gemini-1.5-flash");
        assert_eq!(client.model_name(), "gemini-1.5-flash");
        assert_eq!(client.send("hi").await.unwrap(), "flash");
    }

    #[tokio::test]
    async fn test_send_reports_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_error_hides_api_key() {
        // Nothing listens on port 1
        let client = GeminiClient::new("SUPER-SECRET-KEY").with_base_url("http://127.0.0.1:1");

        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Http(_)));
        let shown = err.user_message();
        assert!(!shown.contains("SUPER-SECRET-KEY"), "leaked key: {shown}");
        assert!(!format!("{err:?}").contains("SUPER-SECRET-KEY"));
    }

    #[tokio::test]
    async fn test_api_key_not_in_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .mount(&server)
            .await;

        client_for(&server).send("hello").await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = Config::default();
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(ChatError::MissingApiKey)
        ));

        config.api_key = Some("  ".to_string());
        assert!(GeminiClient::from_config(&config).is_err());

        config.api_key = Some("abc".to_string());
        config.model = "gemini-1.5-flash".to_string();
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }
}
