use crate::domain::types::ChatMessage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const DEFAULT_MAX_ITERATIONS: usize = 8;

/// One think/act cycle as observed by the loop.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub iteration: usize,
    pub tool: String,
    pub args: Value,
    pub success: bool,
    pub output: Value,
}

/// Why the run reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The model produced the terminate action.
    Terminate,
    /// The configured iteration cap was reached first.
    IterationCap,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    pub run_id: String,
    pub response: Option<String>,
    pub halt: HaltReason,
    pub steps: Vec<AgentStep>,
    pub transcript: Vec<ChatMessage>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Model override for this run; the agent's default route otherwise.
    pub model: Option<String>,
    /// Extra instruction appended to the composed agent rules.
    pub system_prompt: Option<String>,
    pub max_iterations: usize,
    pub memory_limit: Option<usize>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: None,
            system_prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            memory_limit: None,
        }
    }
}
