use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// What the model is told about a tool: its name, what it does, and a
/// JSON-schema-like description of the arguments it takes.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters,
        }
    }
}

/// A locally registered capability the agent can invoke by name.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, args: Map<String, Value>) -> Result<Value, ToolInvokeError>;
}

#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("missing required argument '{name}'")]
    MissingArgument { name: String },

    #[error("argument '{name}' must be a {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),
}
