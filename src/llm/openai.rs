use crate::config::{ApiCredential, BrochureConfig};
use crate::error::{BrochureError, Result};
use crate::llm::sse::sse_to_delta_stream;
use crate::llm::{ChatMessage, ChatModel, ChatRequest, DeltaStream};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    credential: ApiCredential,
    base_url: String,
    model: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("http", &"<reqwest::Client>")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(credential: ApiCredential, base_url: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            credential,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Build a client from the shared configuration
    pub fn from_config(credential: ApiCredential, config: &BrochureConfig) -> Self {
        Self::new(credential, &config.api_base_url, &config.model)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(&self, request: &ChatRequest, stream: bool) -> Result<reqwest::Response> {
        let body = ApiRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            stream,
            response_format: request
                .json_object
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        ::log::debug!(
            "Chat completion request to {} (model {}, stream {})",
            self.base_url,
            self.model,
            stream
        );

        let mut builder = self.http.post(self.endpoint()).json(&body);
        if let Some(key) = self.credential.key() {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            ::log::error!("Chat completion API error {}: {}", status, body);
            return Err(BrochureError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self.send(request, false).await?;
        let text = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&text)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(BrochureError::EmptyResponse)
    }

    async fn stream(&self, request: &ChatRequest) -> Result<DeltaStream> {
        let response = self.send(request, true).await?;
        Ok(sse_to_delta_stream(response))
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
