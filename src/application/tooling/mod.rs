mod builtin;
mod interface;

pub use builtin::builtin_tool;
pub use interface::{ToolHandler, ToolInvokeError, ToolSpec};

use crate::application::agent::Action;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct RegisteredTool {
    spec: ToolSpec,
    handler: Arc<dyn ToolHandler>,
}

/// Explicit registry mapping tool names to specs and handlers. Lookup is
/// case-insensitive; listing order follows registration order.
#[derive(Default)]
pub struct ToolRegistry {
    index: HashMap<String, RegisteredTool>,
    order: Vec<String>,
}

/// Outcome of dispatching one action. `output` is the exact payload fed
/// back into memory: `{"result": ...}` on success, `{"error": "..."}`
/// otherwise.
#[derive(Debug, Clone)]
pub struct ToolExecution {
    pub tool: String,
    pub success: bool,
    pub output: Value,
}

impl ToolExecution {
    pub fn ok(tool: impl Into<String>, value: Value) -> Self {
        Self {
            tool: tool.into(),
            success: true,
            output: json!({"result": value}),
        }
    }

    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            success: false,
            output: json!({"error": message.into()}),
        }
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: ToolSpec, handler: Arc<dyn ToolHandler>) {
        let key = spec.name.to_lowercase();
        if self.index.contains_key(&key) {
            warn!(tool = %spec.name, "Replacing previously registered tool");
        } else {
            self.order.push(key.clone());
        }
        self.index.insert(key, RegisteredTool { spec, handler });
    }

    pub fn specs(&self) -> Vec<&ToolSpec> {
        self.order
            .iter()
            .filter_map(|key| self.index.get(key))
            .map(|tool| &tool.spec)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Dispatch an action to its registered tool. Unknown tools, argument
    /// violations, and handler failures all come back as error results,
    /// never as faults; the loop stays alive on every path.
    pub async fn dispatch(&self, action: &Action) -> ToolExecution {
        let key = action.tool_name.to_lowercase();
        let Some(tool) = self.index.get(&key) else {
            warn!(requested_tool = %action.tool_name, "Unknown tool requested by agent");
            return ToolExecution::error(
                &action.tool_name,
                format!("Unknown action: {}", action.tool_name),
            );
        };

        if let Err(err) = validate_args(&tool.spec, &action.args) {
            warn!(tool = %tool.spec.name, %err, "Rejected tool call before invocation");
            return ToolExecution::error(&tool.spec.name, err.to_string());
        }

        match tool.handler.invoke(action.args.clone()).await {
            Ok(value) => {
                info!(tool = %tool.spec.name, success = true, "Tool executed");
                ToolExecution::ok(&tool.spec.name, value)
            }
            Err(err) => {
                warn!(tool = %tool.spec.name, %err, "Tool execution failed");
                ToolExecution::error(&tool.spec.name, err.to_string())
            }
        }
    }
}

/// Checks the declared `required` fields before the handler runs.
fn validate_args(spec: &ToolSpec, args: &Map<String, Value>) -> Result<(), ToolInvokeError> {
    let Some(required) = spec.parameters.get("required").and_then(Value::as_array) else {
        return Ok(());
    };
    for name in required.iter().filter_map(Value::as_str) {
        if !args.contains_key(name) {
            return Err(ToolInvokeError::MissingArgument {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
