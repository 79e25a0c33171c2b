pub mod openai;
pub mod sse;

pub use openai::OpenAiClient;

use crate::error::Result;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Incremental content fragments of a streamed completion
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completion request independent of the wire format
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Constrain the answer to a JSON object
    pub json_object: bool,
}

impl ChatRequest {
    /// System instructions followed by one user message
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature,
            json_object: false,
        }
    }

    pub fn with_json_object(mut self) -> Self {
        self.json_object = true;
        self
    }

    /// Content of the first user message
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Text-generation service used by the filter and the generator
pub trait ChatModel: Send + Sync {
    /// Send the request and return the full answer.
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;

    /// Send the request in streaming mode and return its content deltas.
    fn stream(&self, request: &ChatRequest) -> impl Future<Output = Result<DeltaStream>> + Send;
}
