//! Converts transcript messages into the wire formats of each backend.

use crate::domain::types::ChatMessage;
use serde_json::{Value, json};

pub struct MessageAdapter;

impl MessageAdapter {
    /// OpenAI-style `[{"role": "...", "content": "..."}]`.
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_str(),
                    "content": msg.content.clone()
                })
            })
            .collect()
    }

    /// Ollama's chat endpoint accepts the OpenAI message shape.
    pub fn to_ollama_format(messages: &[ChatMessage]) -> Vec<Value> {
        Self::to_openai_format(messages)
    }

    /// Gemini wants system text split out from the turn contents.
    /// Returns `(system_instruction_text, contents)`.
    pub fn to_gemini_format(messages: &[ChatMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role.as_str() {
                "system" => system_parts.push(message.content.clone()),
                "user" => contents.push(json!({
                    "role": "user",
                    "parts": [{"text": message.content.clone()}]
                })),
                "assistant" => contents.push(json!({
                    "role": "model",
                    "parts": [{"text": message.content.clone()}]
                })),
                _ => {}
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system_instruction, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MessageRole;

    #[test]
    fn gemini_format_splits_system_from_turns() {
        let messages = vec![
            ChatMessage::new(MessageRole::System, "rules"),
            ChatMessage::new(MessageRole::User, "hello"),
            ChatMessage::new(MessageRole::Assistant, "hi"),
        ];

        let (system, contents) = MessageAdapter::to_gemini_format(&messages);
        assert_eq!(system.as_deref(), Some("rules"));
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[1]["role"], "model");
    }
}
