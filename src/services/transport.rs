//! HTTP transport for the Messages API
//!
//! Owns the reqwest client, authentication headers, and the conversion of the
//! response byte stream into typed streaming events. Callers pick between the
//! standard and prompt-caching entry points via [`MessageSender`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use reqwest::{header, Client};
use serde::Serialize;

use crate::{
    error::{QueryError, Result},
    messages::{ContentBlock, Message},
    services::{
        streaming::{SseParser, StreamEvent},
        EventStream, MessageSender,
    },
};

/// API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Beta flag enabling prompt caching
pub const PROMPT_CACHING_BETA: &str = "prompt-caching-2024-07-31";

/// Outgoing request payload for the Messages API
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    /// System prompt, always wrapped as a one-element text block list
    pub system: Vec<ContentBlock>,
    pub messages: Vec<Message>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// HTTP transport for the Messages API
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// client cannot be constructed
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    "x-api-key",
                    header::HeaderValue::from_str(api_key).map_err(|_| {
                        QueryError::InvalidConfig("Invalid API key format".to_string())
                    })?,
                );
                headers.insert(
                    "anthropic-version",
                    header::HeaderValue::from_static(ANTHROPIC_VERSION),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn post_stream(
        &self,
        request: &MessagesRequest,
        beta: Option<&'static str>,
    ) -> Result<EventStream> {
        let mut builder = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .json(request);

        if let Some(beta) = beta {
            builder = builder.header("anthropic-beta", beta);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(QueryError::Api(format!("HTTP {status}: {error_text}")));
        }

        Ok(Box::pin(event_stream(response.bytes_stream())))
    }
}

#[async_trait]
impl MessageSender for HttpTransport {
    async fn send(&self, request: &MessagesRequest) -> Result<EventStream> {
        self.post_stream(request, None).await
    }

    async fn send_with_caching(&self, request: &MessagesRequest) -> Result<EventStream> {
        self.post_stream(request, Some(PROMPT_CACHING_BETA)).await
    }
}

/// Turn the SSE byte stream into typed events
///
/// Events are yielded as they arrive; the stream ends after `message_stop`.
/// Dropping the returned stream abandons the underlying response.
fn event_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<StreamEvent>> + Send + 'static {
    async_stream::stream! {
        let mut parser = SseParser::new();
        let mut byte_stream = Box::pin(byte_stream);

        'receive: while let Some(chunk_result) = byte_stream.next().await {
            let bytes = match chunk_result {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(QueryError::Http(e));
                    break;
                }
            };

            let text = match std::str::from_utf8(&bytes) {
                Ok(text) => text,
                Err(e) => {
                    yield Err(QueryError::Stream(format!("Invalid UTF-8 in stream: {e}")));
                    break;
                }
            };

            for sse_event in parser.parse_chunk(text) {
                match serde_json::from_str::<StreamEvent>(&sse_event.data) {
                    Ok(event) => {
                        let done = matches!(event, StreamEvent::MessageStop);
                        yield Ok(event);
                        if done {
                            break 'receive;
                        }
                    }
                    Err(e) => {
                        yield Err(QueryError::Stream(format!("Failed to parse event: {e}")));
                        break 'receive;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::messages::Message;

    fn request() -> MessagesRequest {
        MessagesRequest {
            model: "claude-3-5-sonnet-20241022".into(),
            max_tokens: 1024,
            system: vec![ContentBlock::text("be brief")],
            messages: vec![Message::user("hello")],
            stream: true,
            temperature: None,
        }
    }

    fn sse_body() -> String {
        [
            r#"event: message_start
data: {"type":"message_start","message":{"id":"msg_1","model":"claude-3-5-sonnet-20241022","role":"assistant","usage":{"input_tokens":12,"output_tokens":0}}}"#,
            r#"event: content_block_start
data: {"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}"#,
            r#"event: content_block_delta
data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
            r#"event: content_block_stop
data: {"type":"content_block_stop","index":0}"#,
            r#"event: message_delta
data: {"type":"message_delta","delta":{"stop_reason":"end_turn","stop_sequence":null},"usage":{"output_tokens":3}}"#,
            r#"event: message_stop
data: {"type":"message_stop"}"#,
        ]
        .join("\n\n")
            + "\n\n"
    }

    async fn mount_ok(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body(), "text/event-stream"),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_auth_headers_attached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body(), "text/event-stream"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new("sk-test", server.uri()).unwrap();
        let stream = transport.send(&request()).await.unwrap();
        let _events: Vec<_> = stream.collect().await;
    }

    #[tokio::test]
    async fn test_caching_send_attaches_beta_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-beta", PROMPT_CACHING_BETA))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body(), "text/event-stream"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new("sk-test", server.uri()).unwrap();
        let stream = transport.send_with_caching(&request()).await.unwrap();
        let _events: Vec<_> = stream.collect().await;
    }

    #[tokio::test]
    async fn test_plain_send_has_no_beta_header() {
        let server = MockServer::start().await;
        mount_ok(&server).await;

        let transport = HttpTransport::new("sk-test", server.uri()).unwrap();
        let stream = transport.send(&request()).await.unwrap();
        let _events: Vec<_> = stream.collect().await;

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0].headers.contains_key("anthropic-beta"));
    }

    #[tokio::test]
    async fn test_events_forwarded_in_order() {
        let server = MockServer::start().await;
        mount_ok(&server).await;

        let transport = HttpTransport::new("sk-test", server.uri()).unwrap();
        let stream = transport.send(&request()).await.unwrap();
        let events: Vec<_> = stream.map(|e| e.unwrap()).collect().await;

        assert_eq!(events.len(), 6);
        match &events[0] {
            StreamEvent::MessageStart { message } => {
                assert_eq!(message.usage.input_tokens, 12);
            }
            other => panic!("expected message_start, got {other:?}"),
        }
        assert!(matches!(
            events[1],
            StreamEvent::ContentBlockStart { index: 0, .. }
        ));
        assert!(matches!(events.last(), Some(StreamEvent::MessageStop)));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_request"}"#),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new("sk-test", server.uri()).unwrap();
        let err = match transport.send(&request()).await {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };

        match err {
            QueryError::Api(message) => assert!(message.contains("400")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
