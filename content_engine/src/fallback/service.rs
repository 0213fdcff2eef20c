//! Generative service seam and its HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use symbol_db::GameContent;

use crate::error::{FallbackError, Result};

/// One request to a generative service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The word as the player said or typed it.
    pub word: String,
    pub instructions: String,
    /// JSON schema the reply must satisfy.
    pub schema: Value,
}

/// A service that can invent a round for a word the local data does not know.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<GameContent>;
}

/// OpenAI-compatible chat-completions service with structured output.
pub struct HttpGenerativeService {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpGenerativeService {
    /// `timeout` bounds the HTTP exchange itself; callers add their own
    /// per-request deadline on top.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.instructions },
                { "role": "user", "content": request.word },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "game_content",
                    "strict": true,
                    "schema": request.schema,
                }
            }
        })
    }
}

#[async_trait]
impl GenerativeService for HttpGenerativeService {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GameContent> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&self.request_body(request));
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FallbackError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: Value = resp.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                FallbackError::InvalidResponse("missing message content in response".to_string())
            })?;

        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_db::ContentType;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerationRequest {
        GenerationRequest {
            word: "unicorn".to_string(),
            instructions: "Pick visuals.".to_string(),
            schema: json!({ "type": "object" }),
        }
    }

    fn completion(content: &str) -> Value {
        json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    async fn service_for(server: &MockServer) -> HttpGenerativeService {
        HttpGenerativeService::new(
            format!("{}/v1/chat/completions", server.uri()),
            "test-model",
            Some("sk-test".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_parses_structured_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "response_format": { "type": "json_schema" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"type":"emoji","targetValue":"🦄","distractors":["🐸","🚗"]}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let content = service_for(&server).await.generate(&request()).await.unwrap();
        assert_eq!(content.content_type, ContentType::Symbol);
        assert_eq!(content.target_value, "🦄");
        assert_eq!(content.distractors, ["🐸".to_string(), "🚗".to_string()]);
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = service_for(&server).await.generate(&request()).await.unwrap_err();
        match err {
            FallbackError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = service_for(&server).await.generate(&request()).await.unwrap_err();
        assert!(matches!(err, FallbackError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_reply_outside_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"type":"emoji","targetValue":"🦄","distractors":["🐸"]}"#,
            )))
            .mount(&server)
            .await;

        let err = service_for(&server).await.generate(&request()).await.unwrap_err();
        assert!(matches!(err, FallbackError::Json(_)));
    }
}
