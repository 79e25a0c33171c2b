/// Errors raised inside the brochure pipeline.
///
/// Most of these never reach the caller: page fetches fall back to an error
/// page, the link filter falls back to an empty selection and a failed
/// generation ends its run with a `Failed` event.
#[derive(Debug, thiserror::Error)]
pub enum BrochureError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chat completion request failed (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("SSE parse error: {0}")]
    Sse(String),

    #[error("empty response from chat completion endpoint")]
    EmptyResponse,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BrochureError>;
