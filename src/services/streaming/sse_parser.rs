//! Server-Sent Events (SSE) parser
//!
//! Incremental parser for the SSE framing used by the Messages API stream.
//! Chunks may split events at arbitrary byte boundaries, so lines are
//! buffered until a blank line terminates the event.

/// SSE event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SseEvent {
    /// Event type (e.g., "message_start", "content_block_delta")
    pub event_type: Option<String>,

    /// Event data (JSON payload)
    pub data: String,

    /// Event ID (for reconnection)
    pub id: Option<String>,
}

impl SseEvent {
    /// Check if event is complete (has data)
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.data.is_empty()
    }
}

/// SSE parser for streaming responses
///
/// Follows the W3C Server-Sent Events specification:
/// https://html.spec.whatwg.org/multipage/server-sent-events.html
#[derive(Default)]
pub struct SseParser {
    /// Current event being assembled
    current_event: SseEvent,

    /// Buffer for incomplete lines
    line_buffer: String,
}

impl SseParser {
    /// Create a new SSE parser
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a chunk of SSE data
    ///
    /// Returns completed events. Incomplete events are buffered until next call.
    pub fn parse_chunk(&mut self, chunk: &str) -> Vec<SseEvent> {
        let mut events = Vec::new();

        self.line_buffer.push_str(chunk);

        while let Some(line_end) = self.line_buffer.find('\n') {
            let line = self.line_buffer[..line_end]
                .trim_end_matches('\r')
                .to_string();
            self.line_buffer.drain(..=line_end);

            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }

        events
    }

    /// Process a single line from the SSE stream
    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        // Empty line signals end of event
        if line.is_empty() {
            if self.current_event.is_complete() {
                return Some(std::mem::take(&mut self.current_event));
            }
            return None;
        }

        // Ignore comments
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = Self::parse_field(line);
        match field {
            "event" => {
                self.current_event.event_type = Some(value.to_string());
            }
            "data" => {
                if !self.current_event.data.is_empty() {
                    self.current_event.data.push('\n');
                }
                self.current_event.data.push_str(value);
            }
            "id" => {
                self.current_event.id = Some(value.to_string());
            }
            _ => {
                // Unknown field, ignore
            }
        }

        None
    }

    /// Parse a field line into (field_name, value)
    fn parse_field(line: &str) -> (&str, &str) {
        match line.find(':') {
            Some(colon_pos) => {
                let field = &line[..colon_pos];
                let value = &line[colon_pos + 1..];
                (field, value.strip_prefix(' ').unwrap_or(value))
            }
            None => (line, ""),
        }
    }

    /// Flush any remaining buffered event
    pub fn flush(&mut self) -> Option<SseEvent> {
        if !self.line_buffer.is_empty() {
            let line = std::mem::take(&mut self.line_buffer);
            self.process_line(&line);
        }

        if self.current_event.is_complete() {
            Some(std::mem::take(&mut self.current_event))
        } else {
            None
        }
    }
}
