use crate::error::BrochureError;
use crate::llm::DeltaStream;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use serde::Deserialize;

/// Marker event closing an OpenAI-style stream
const DONE_MARKER: &str = "[DONE]";

/// Convert a streaming chat-completion response into its content deltas
pub fn sse_to_delta_stream(response: reqwest::Response) -> DeltaStream {
    let events = response.bytes_stream().eventsource();
    let deltas = events
        .take_while(|event| {
            let done = matches!(event, Ok(event) if event.data.trim() == DONE_MARKER);
            futures::future::ready(!done)
        })
        .filter_map(|event| {
            futures::future::ready(match event {
                Ok(event) => parse_delta(&event.data),
                Err(e) => Some(Err(BrochureError::Sse(e.to_string()))),
            })
        });
    Box::pin(deltas)
}

/// Content carried by one `data:` payload, if any
pub fn parse_delta(data: &str) -> Option<Result<String, BrochureError>> {
    let data = data.trim();
    if data.is_empty() || data == DONE_MARKER {
        return None;
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            if let Some(error) = chunk.error {
                return Some(Err(BrochureError::Sse(format!(
                    "stream error: {}",
                    error.message
                ))));
            }
            let content = chunk
                .choices
                .first()
                .and_then(|c| c.delta.content.as_deref())
                .unwrap_or_default();

            if content.is_empty() {
                None
            } else {
                Some(Ok(content.to_owned()))
            }
        }
        Err(e) => Some(Err(BrochureError::Sse(format!(
            "failed to parse SSE data: {e}"
        )))),
    }
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_delta() {
        let data = r#"{"id":"c1","choices":[{"index":0,"delta":{"content":"Hello"}}]}"#;
        assert_eq!(parse_delta(data).unwrap().unwrap(), "Hello");
    }

    #[test]
    fn test_parse_role_only_delta() {
        let data = r#"{"choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}"#;
        assert!(parse_delta(data).is_none());

        let data = r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
        assert!(parse_delta(data).is_none());
    }

    #[test]
    fn test_parse_done_marker() {
        assert!(parse_delta("[DONE]").is_none());
        assert!(parse_delta("").is_none());
    }

    #[test]
    fn test_parse_error_payload() {
        let data = r#"{"error":{"message":"context length exceeded","type":"invalid_request_error"}}"#;
        let err = parse_delta(data).unwrap().unwrap_err();
        assert!(err.to_string().contains("context length exceeded"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_delta("{not json"),
            Some(Err(BrochureError::Sse(_)))
        ));
    }
}
