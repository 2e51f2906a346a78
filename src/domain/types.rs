use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "system" => Some(MessageRole::System),
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Ordered, append-only conversation transcript owned by a single agent run.
///
/// An optional `limit` caps the transcript; once exceeded, the oldest
/// entries are dropped first. Without a limit the transcript grows for the
/// lifetime of the run.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    entries: Vec<ChatMessage>,
    limit: Option<usize>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push(message);
        self.enforce_limit();
    }

    /// Appends one think/act exchange: the raw model response as an
    /// assistant message followed by the serialized action result as a
    /// user message, preserving that order.
    pub fn record_exchange(&mut self, response: impl Into<String>, result: impl Into<String>) {
        self.entries
            .push(ChatMessage::new(MessageRole::Assistant, response));
        self.entries.push(ChatMessage::new(MessageRole::User, result));
        self.enforce_limit();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exchange_preserves_order() {
        let mut memory = Memory::new();
        memory.push(ChatMessage::new(MessageRole::User, "list files"));
        memory.record_exchange("raw response", "{\"result\":[]}");

        let messages = memory.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "raw response");
        assert_eq!(messages[2].role, MessageRole::User);
        assert_eq!(messages[2].content, "{\"result\":[]}");
    }

    #[test]
    fn limit_drops_oldest_entries_first() {
        let mut memory = Memory::with_limit(Some(4));
        memory.push(ChatMessage::new(MessageRole::User, "task"));
        memory.record_exchange("first response", "first result");
        memory.record_exchange("second response", "second result");

        let messages = memory.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].content, "first result");
        assert_eq!(messages[3].content, "second result");
    }

    #[test]
    fn unlimited_memory_keeps_everything() {
        let mut memory = Memory::with_limit(None);
        for round in 0..32 {
            memory.record_exchange(format!("response {round}"), format!("result {round}"));
        }
        assert_eq!(memory.len(), 64);
    }
}
