//! Message types for Claude conversations
//!
//! Defines the conversation payload shapes sent to the Messages API: roles,
//! content blocks, and the cache-breakpoint marker attached to blocks when
//! prompt caching is in play.

use serde::{Deserialize, Serialize};

/// Message role in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Cache-breakpoint marker attached to a content block
///
/// Instructs the provider to cache the prompt prefix up to and including
/// the block carrying it. Serializes as `{"type":"ephemeral"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheControl {
    #[serde(rename = "type")]
    pub cache_type: CacheType,
}

/// Cache retention type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Ephemeral,
}

impl CacheControl {
    /// The ephemeral (default) cache-breakpoint marker
    #[must_use]
    pub const fn ephemeral() -> Self {
        Self {
            cache_type: CacheType::Ephemeral,
        }
    }
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cache_control: Option<CacheControl>,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        cache_control: Option<CacheControl>,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cache_control: Option<CacheControl>,
    },
}

impl ContentBlock {
    /// Create a plain text block with no marker
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            cache_control: None,
        }
    }

    /// Attach a cache-breakpoint marker to this block
    pub fn set_cache_control(&mut self, control: CacheControl) {
        match self {
            Self::Text { cache_control, .. }
            | Self::ToolUse { cache_control, .. }
            | Self::ToolResult { cache_control, .. } => *cache_control = Some(control),
        }
    }

    /// The marker on this block, if any
    #[must_use]
    pub const fn cache_control(&self) -> Option<&CacheControl> {
        match self {
            Self::Text { cache_control, .. }
            | Self::ToolUse { cache_control, .. }
            | Self::ToolResult { cache_control, .. } => cache_control.as_ref(),
        }
    }
}

/// Message content: a plain string or an ordered list of content blocks
///
/// The Messages API accepts both forms; plain strings are forwarded as-is
/// unless the annotation step needs to attach a marker, in which case the
/// string is wrapped in a one-element text block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// Create a new user message with plain string content
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a new assistant message with plain string content
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Get text content from the message (concatenates all text parts)
    #[must_use]
    pub fn text_content(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Check if this is a user message
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text_content(), "Hello");
        assert!(msg.is_user());
    }

    #[test]
    fn test_plain_string_content_serializes_as_string() {
        let msg = Message::user("Hello");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "user", "content": "Hello"})
        );
    }

    #[test]
    fn test_block_content_serializes_as_array() {
        let msg = Message {
            role: Role::Assistant,
            content: MessageContent::Blocks(vec![ContentBlock::text("Hi there")]),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "assistant", "content": [{"type": "text", "text": "Hi there"}]})
        );
    }

    #[test]
    fn test_cache_control_serialization() {
        let mut block = ContentBlock::text("cached");
        block.set_cache_control(CacheControl::ephemeral());
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "text",
                "text": "cached",
                "cache_control": {"type": "ephemeral"}
            })
        );
    }

    #[test]
    fn test_unmarked_block_omits_cache_control() {
        let value = serde_json::to_value(ContentBlock::text("plain")).unwrap();
        assert!(value.get("cache_control").is_none());
    }

    #[test]
    fn test_content_deserializes_both_forms() {
        let plain: Message =
            serde_json::from_value(json!({"role": "user", "content": "hi"})).unwrap();
        assert_eq!(plain.content, MessageContent::Text("hi".into()));

        let structured: Message = serde_json::from_value(json!({
            "role": "user",
            "content": [{"type": "text", "text": "hi"}]
        }))
        .unwrap();
        assert_eq!(
            structured.content,
            MessageContent::Blocks(vec![ContentBlock::text("hi")])
        );
    }

    #[test]
    fn test_text_content_joins_text_blocks() {
        let msg = Message {
            role: Role::User,
            content: MessageContent::Blocks(vec![
                ContentBlock::text("part 1"),
                ContentBlock::ToolResult {
                    tool_use_id: "tool_1".into(),
                    content: "ok".into(),
                    is_error: None,
                    cache_control: None,
                },
                ContentBlock::text("part 2"),
            ]),
        };
        assert_eq!(msg.text_content(), "part 1\npart 2");
    }
}
