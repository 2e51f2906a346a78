mod action;
mod models;

pub use action::{Action, ERROR_TOOL, TERMINATE_TOOL, parse_action};
pub use models::{AgentOptions, AgentOutcome, AgentStep, HaltReason};

use crate::application::tooling::{ToolExecution, ToolRegistry};
use crate::domain::types::{ChatMessage, Memory, MessageRole};
use crate::infrastructure::model::{ModelError, ModelProvider, ModelRequest, ModelRoute};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct Agent<P: ModelProvider> {
    provider: Arc<P>,
    registry: ToolRegistry,
    route: ModelRoute,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(provider: Arc<P>, registry: ToolRegistry, route: ModelRoute) -> Self {
        Self {
            provider,
            registry,
            route,
        }
    }

    /// Drives think/act cycles until the model produces the terminate
    /// action or the iteration cap is reached. Parse failures, unknown
    /// tools, and handler failures are fed back into memory as error
    /// results; only a failing model call aborts the run.
    pub async fn run(
        &self,
        task: String,
        options: AgentOptions,
    ) -> Result<AgentOutcome, ModelError> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(run_id = run_id.as_str(), "Agent run started");

        let route = ModelRoute {
            provider: self.route.provider.clone(),
            model: options.model.clone().unwrap_or_else(|| self.route.model.clone()),
        };
        let rules = self.compose_rules(options.system_prompt.as_deref());

        let mut memory = Memory::with_limit(options.memory_limit);
        memory.push(ChatMessage::new(MessageRole::User, task));
        let mut steps = Vec::new();

        for iteration in 0..options.max_iterations {
            debug!(
                run_id = run_id.as_str(),
                iteration, "Submitting agent turn to model provider"
            );

            let mut messages = Vec::with_capacity(memory.len() + 1);
            messages.push(ChatMessage::new(MessageRole::System, rules.clone()));
            messages.extend(memory.messages().iter().cloned());

            let response = self
                .provider
                .chat(ModelRequest::new(&route, messages))
                .await?;
            let content = response.message.content;

            let action = action::parse_action(&content);

            if action.is_terminate() {
                let summary = action.message().unwrap_or_default().to_string();
                memory.record_exchange(content, json!({"result": summary}).to_string());
                info!(
                    run_id = run_id.as_str(),
                    iteration, "Agent produced terminate action"
                );
                return Ok(AgentOutcome {
                    run_id,
                    response: Some(summary),
                    halt: HaltReason::Terminate,
                    steps,
                    transcript: memory.into_messages(),
                    started_at,
                });
            }

            let execution = if action.is_error() {
                let message = action.message().unwrap_or("malformed action").to_string();
                warn!(
                    run_id = run_id.as_str(),
                    iteration,
                    message = message.as_str(),
                    "Agent response could not be parsed into an action"
                );
                ToolExecution::error(ERROR_TOOL, message)
            } else {
                self.registry.dispatch(&action).await
            };

            steps.push(AgentStep {
                iteration,
                tool: execution.tool.clone(),
                args: Value::Object(action.args.clone()),
                success: execution.success,
                output: execution.output.clone(),
            });

            memory.record_exchange(content, execution.output.to_string());
        }

        warn!(
            run_id = run_id.as_str(),
            max_iterations = options.max_iterations,
            "Agent reached the iteration cap without terminating"
        );
        Ok(AgentOutcome {
            run_id,
            response: None,
            halt: HaltReason::IterationCap,
            steps,
            transcript: memory.into_messages(),
            started_at,
        })
    }

    /// Fixed system instructions for every turn: the action format and
    /// the tool catalogue, with the terminate tool always advertised.
    pub fn compose_rules(&self, extra: Option<&str>) -> String {
        let mut lines = vec![
            "You are an AI agent that can perform tasks by using the available tools.".to_string(),
            String::new(),
            "Every response MUST contain exactly one action inside a fenced block:".to_string(),
            "```action".to_string(),
            "{\"tool_name\": \"insert tool_name\", \"args\": {...fill in any required arguments here...}}".to_string(),
            "```".to_string(),
            String::new(),
            "Available tools:".to_string(),
        ];

        for spec in self.registry.specs() {
            let mut line = format!("- {}", spec.name);
            if let Some(description) = &spec.description {
                line.push_str(&format!(": {description}"));
            }
            let compact = serde_json::to_string(&spec.parameters).unwrap_or_default();
            line.push_str(&format!(" Input schema: {compact}"));
            lines.push(line);
        }
        lines.push(format!(
            "- {TERMINATE_TOOL}(message): End the loop and report the final answer in 'message'."
        ));

        if let Some(extra) = extra {
            let trimmed = extra.trim();
            if !trimmed.is_empty() {
                lines.push(String::new());
                lines.push(trimmed.to_string());
            }
        }

        lines.join("\n")
    }
}
