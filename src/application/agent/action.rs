use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool name that ends the loop and carries the final answer.
pub const TERMINATE_TOOL: &str = "terminate";

/// Tool name of the synthetic action produced on parse failure.
pub const ERROR_TOOL: &str = "error";

const ACTION_FENCE: &str = "```action";
const FENCE: &str = "```";

/// A decoded instruction naming a tool and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub tool_name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl Action {
    pub fn error(message: impl Into<String>) -> Self {
        let mut args = Map::new();
        args.insert("message".to_string(), Value::String(message.into()));
        Self {
            tool_name: ERROR_TOOL.to_string(),
            args,
        }
    }

    pub fn is_terminate(&self) -> bool {
        self.tool_name.eq_ignore_ascii_case(TERMINATE_TOOL)
    }

    pub fn is_error(&self) -> bool {
        self.tool_name == ERROR_TOOL
    }

    /// The `message` argument, used by both `terminate` and `error`.
    pub fn message(&self) -> Option<&str> {
        self.args.get("message").and_then(Value::as_str)
    }
}

/// Parses a model response into an Action. This function never fails:
/// a missing fence or an undecodable payload yields the synthetic
/// `error` action so the loop always has something valid to act on.
pub fn parse_action(content: &str) -> Action {
    let Some(block) = extract_fenced_block(content) else {
        return Action::error("response did not contain a fenced action block");
    };

    match serde_json::from_str::<Action>(block.trim()) {
        Ok(action) => action,
        Err(err) => Action::error(format!("invalid action payload: {err}")),
    }
}

/// Prefers a labelled ```action fence, falls back to the first generic
/// fence. Returns `None` when no complete fenced block exists.
fn extract_fenced_block(content: &str) -> Option<&str> {
    let start = content
        .find(ACTION_FENCE)
        .map(|idx| idx + ACTION_FENCE.len())
        .or_else(|| content.find(FENCE).map(|idx| idx + FENCE.len()))?;

    let rest = &content[start..];
    let end = rest.find(FENCE)?;
    let block = &rest[..end];

    // A generic fence may carry a language label on its opening line.
    match block.split_once('\n') {
        Some((first, remainder)) if !first.trim_start().starts_with('{') => Some(remainder),
        _ => Some(block),
    }
}
