use serde::{Deserialize, Serialize};

/// A tool enabled for the agent, referenced by built-in name.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawTool {
    Name(String),
    Detailed {
        name: String,
        description: Option<String>,
    },
}

impl From<RawTool> for ToolConfig {
    fn from(value: RawTool) -> Self {
        match value {
            RawTool::Name(name) => Self {
                name,
                description: None,
            },
            RawTool::Detailed { name, description } => Self { name, description },
        }
    }
}
