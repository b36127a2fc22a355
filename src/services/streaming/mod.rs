//! Streaming event types for the Messages API
//!
//! The client forwards these events to the caller verbatim; nothing here is
//! transformed or buffered. Unrecognized event types deserialize to
//! [`StreamEvent::Unknown`] so new provider events never fail the stream.

pub mod sse_parser;

pub use sse_parser::{SseEvent, SseParser};

use serde::{Deserialize, Serialize};

use crate::services::Usage;

/// Stream event emitted by the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Initial message metadata, including input token usage
    MessageStart { message: MessageMetadata },

    /// Start of a content block
    ContentBlockStart {
        index: usize,
        content_block: ContentBlockStart,
    },

    /// Delta update for a content block
    ContentBlockDelta { index: usize, delta: ContentDelta },

    /// End of a content block
    ContentBlockStop { index: usize },

    /// Message-level delta (stop reason, output token usage)
    MessageDelta {
        delta: MessageDeltaData,
        #[serde(skip_serializing_if = "Option::is_none")]
        usage: Option<UsageDelta>,
    },

    /// End of message stream
    MessageStop,

    /// Ping event (keepalive)
    Ping,

    /// Error event
    Error { error: ErrorData },

    /// Any event type this client does not recognize
    #[serde(other)]
    Unknown,
}

/// Message metadata from message_start event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub id: String,
    pub model: String,
    pub role: String,
    pub usage: Usage,
}

/// Content block start data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockStart {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
    },
}

/// Content delta types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentDelta {
    TextDelta { text: String },
    InputJsonDelta { partial_json: String },
}

/// Message delta data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaData {
    pub stop_reason: Option<String>,
    pub stop_sequence: Option<String>,
}

/// Usage delta for streaming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageDelta {
    pub output_tokens: Option<u32>,
}

/// Error data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
