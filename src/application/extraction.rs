//! Coerces freeform model output into JSON matching a caller-supplied
//! schema, with a bounded number of attempts.

use crate::domain::types::{ChatMessage, MessageRole};
use crate::infrastructure::model::{ModelError, ModelProvider, ModelRequest, ModelRoute};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

const MAX_ATTEMPTS: usize = 3;
const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Why a single extraction attempt did not produce a value.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("model call failed: {0}")]
    Transport(#[from] ModelError),
    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// All attempts were used up; carries the last failure.
#[derive(Debug, Error)]
#[error("structured extraction failed after {attempts} attempts")]
pub struct ExtractionError {
    pub attempts: usize,
    #[source]
    pub last: AttemptFailure,
}

/// Asks the model for JSON conforming to `schema`, up to three attempts.
///
/// Each attempt embeds the schema in a system instruction, requests a
/// ```json block, and decodes the fenced payload (or the raw response
/// when no fence markers are present). The first valid decode wins; the
/// decoded value is NOT checked against the schema beyond being valid
/// JSON. Transport failures count as spent attempts.
pub async fn extract_structured<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    schema: &Value,
    prompt: &str,
) -> Result<Value, ExtractionError> {
    let schema_text =
        serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    let system = format!(
        "You MUST produce output that adheres to the following JSON schema:\n\n{schema_text}\n\nOutput your JSON in a ```json markdown block."
    );

    let mut last = match attempt(provider, route, &system, prompt, 1).await {
        Ok(value) => return Ok(value),
        Err(failure) => failure,
    };

    for round in 2..=MAX_ATTEMPTS {
        match attempt(provider, route, &system, prompt, round).await {
            Ok(value) => return Ok(value),
            Err(failure) => last = failure,
        }
    }

    Err(ExtractionError {
        attempts: MAX_ATTEMPTS,
        last,
    })
}

async fn attempt<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    system: &str,
    prompt: &str,
    round: usize,
) -> Result<Value, AttemptFailure> {
    debug!(round, "Requesting structured output from model provider");

    let request = ModelRequest::new(
        route,
        vec![
            ChatMessage::new(MessageRole::System, system),
            ChatMessage::new(MessageRole::User, prompt),
        ],
    );

    let result = match provider.chat(request).await {
        Ok(response) => {
            let payload = extract_json_payload(&response.message.content);
            serde_json::from_str::<Value>(payload.trim()).map_err(AttemptFailure::from)
        }
        Err(err) => Err(AttemptFailure::from(err)),
    };

    match &result {
        Ok(_) => info!(round, "Structured extraction succeeded"),
        Err(failure) => warn!(round, %failure, "Structured extraction attempt failed"),
    }
    result
}

/// Slice between the first ```json marker and the last closing fence;
/// the raw response when fence markers are absent.
fn extract_json_payload(content: &str) -> &str {
    if let Some(start) = content.find(JSON_FENCE) {
        let inner_start = start + JSON_FENCE.len();
        if let Some(end) = content.rfind(FENCE) {
            if end > inner_start {
                return &content[inner_start..end];
            }
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_payload_is_sliced_out() {
        let content = "Here you go:\n```json\n{\"a\": 1}\n```\nAnything else?";
        assert_eq!(extract_json_payload(content).trim(), "{\"a\": 1}");
    }

    #[test]
    fn raw_response_is_kept_without_fences() {
        let content = "{\"a\": 1}";
        assert_eq!(extract_json_payload(content), content);
    }
}
