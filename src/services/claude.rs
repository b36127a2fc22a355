//! Claude Messages API client with prompt-cache annotation
//!
//! Normalizes a conversation payload before transmission: when the target
//! model supports the prompt-caching beta, the system prompt and the last two
//! user messages receive cache-breakpoint markers and the request goes out
//! through the caching entry point; otherwise the payload is forwarded
//! untouched through the standard entry point. The resulting event stream is
//! handed back to the caller verbatim.

use crate::{
    config::ModelProfile,
    error::Result,
    messages::{CacheControl, ContentBlock, Message, MessageContent},
    services::{
        transport::{HttpTransport, MessagesRequest},
        EventStream, MessageSender,
    },
};

/// Streaming client for a single model profile
pub struct ClaudeClient<S = HttpTransport> {
    sender: S,
    profile: ModelProfile,
}

impl ClaudeClient<HttpTransport> {
    /// Create a client backed by the HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be constructed
    pub fn new(profile: ModelProfile, api_key: &str) -> Result<Self> {
        let sender = HttpTransport::new(api_key, profile.effective_base_url())?;
        Ok(Self::with_sender(profile, sender))
    }
}

impl<S: MessageSender> ClaudeClient<S> {
    /// Create a client over an arbitrary sender
    pub fn with_sender(profile: ModelProfile, sender: S) -> Self {
        Self { sender, profile }
    }

    /// The profile this client sends to
    #[must_use]
    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// Stream a completion for the given system prompt and conversation
    ///
    /// Issues exactly one underlying send per invocation. Transport failures
    /// propagate unchanged.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying transport
    pub async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<EventStream> {
        let caching = self.profile.supports_prompt_caching();
        let request = build_request(&self.profile, system_prompt, messages, caching);

        if caching {
            tracing::debug!(model = %self.profile.model_name, "sending with prompt caching");
            self.sender.send_with_caching(&request).await
        } else {
            tracing::debug!(model = %self.profile.model_name, "sending without prompt caching");
            self.sender.send(&request).await
        }
    }
}

/// Assemble the outgoing payload for one call
fn build_request(
    profile: &ModelProfile,
    system_prompt: &str,
    messages: &[Message],
    caching: bool,
) -> MessagesRequest {
    let messages = if caching {
        add_cache_breakpoints(messages)
    } else {
        messages.to_vec()
    };

    MessagesRequest {
        model: profile.model_name.clone(),
        max_tokens: profile.max_tokens,
        system: wrap_system(system_prompt, caching),
        messages,
        stream: true,
        temperature: profile.temperature,
    }
}

/// Wrap the system prompt as a one-element text block list
///
/// On the caching path the block always carries the marker.
fn wrap_system(system_prompt: &str, caching: bool) -> Vec<ContentBlock> {
    let mut block = ContentBlock::text(system_prompt);
    if caching {
        block.set_cache_control(CacheControl::ephemeral());
    }
    vec![block]
}

/// Attach cache-breakpoint markers to the last two user messages
///
/// Annotation is additive only: roles, text, and ordering are preserved, and
/// the input is never mutated. All other messages are copied through
/// structurally unchanged.
fn add_cache_breakpoints(messages: &[Message]) -> Vec<Message> {
    let user_positions: Vec<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, message)| message.is_user())
        .map(|(index, _)| index)
        .collect();
    let targets = &user_positions[user_positions.len().saturating_sub(2)..];

    messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            if targets.contains(&index) {
                with_breakpoint(message)
            } else {
                message.clone()
            }
        })
        .collect()
}

/// Copy a message with a marker on its final content block
///
/// Plain-string content is wrapped into a one-element text block list first.
/// A zero-block message has nothing to mark and is copied through as-is.
fn with_breakpoint(message: &Message) -> Message {
    let content = match &message.content {
        MessageContent::Text(text) => {
            let mut block = ContentBlock::text(text.clone());
            block.set_cache_control(CacheControl::ephemeral());
            MessageContent::Blocks(vec![block])
        }
        MessageContent::Blocks(blocks) => {
            let mut blocks = blocks.clone();
            if let Some(last) = blocks.last_mut() {
                last.set_cache_control(CacheControl::ephemeral());
            }
            MessageContent::Blocks(blocks)
        }
    };

    Message {
        role: message.role,
        content,
    }
}
