//! Service layer for the Messages API
//!
//! [`claude`] owns payload normalization (cache-breakpoint annotation and the
//! caching/plain dispatch); [`transport`] owns the HTTP collaborator; and
//! [`streaming`] owns the SSE plumbing and event types forwarded to callers.

pub mod claude;
pub mod streaming;
pub mod transport;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::streaming::StreamEvent;
use crate::services::transport::MessagesRequest;

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<u32>,
}

/// Lazy, single-consumer sequence of streaming events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

/// The two send entry points exposed by the Messages API transport
///
/// Both accept a finished request payload and return the provider's event
/// stream. The caching entry point differs only in the beta header it
/// attaches; selecting between the two is the caller's concern.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send through the standard endpoint
    async fn send(&self, request: &MessagesRequest) -> Result<EventStream>;

    /// Send through the prompt-caching beta endpoint
    async fn send_with_caching(&self, request: &MessagesRequest) -> Result<EventStream>;
}
