// Expert consultation tests - persona injection and chain semantics.

use astrolabe_agent::expert::{consult_expert, create_and_consult_expert, develop_feature};
use astrolabe_agent::model::{
    ModelError, ModelProvider, ModelRequest, ModelResponse, ModelRoute,
};
use astrolabe_agent::types::MessageRole;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Answers each call from a script; `Err` entries simulate transport
/// failures. Records every request it sees.
struct ScriptedProvider {
    outcomes: Mutex<Vec<Result<String, ()>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    fn new(outcomes: Vec<Result<&str, ()>>) -> Self {
        Self {
            outcomes: Mutex::new(
                outcomes
                    .into_iter()
                    .map(|outcome| outcome.map(String::from))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    async fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.requests.lock().await.push(request.clone());
        let mut outcomes = self.outcomes.lock().await;
        match outcomes.remove(0) {
            Ok(content) => Ok(ModelResponse::new(content)),
            Err(()) => Err(ModelError::invalid_response(request.provider, "scripted failure")),
        }
    }
}

fn route() -> ModelRoute {
    ModelRoute::new("scripted", "llama3")
}

#[tokio::test]
async fn persona_is_injected_as_system_instruction() {
    let provider = ScriptedProvider::new(vec![Ok("categorized as IT Equipment")]);

    let response = consult_expert(
        &provider,
        &route(),
        "A senior financial analyst with deep expertise in corporate spending categorization.",
        "Classify the expense: two laptops",
    )
    .await
    .expect("consultation succeeds");

    assert_eq!(response, "categorized as IT Equipment");

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages[0].role, MessageRole::System);
    assert!(
        messages[0]
            .content
            .starts_with("Act as the following expert")
    );
    assert!(messages[0].content.contains("senior financial analyst"));
    assert_eq!(messages[1].role, MessageRole::User);
}

#[tokio::test]
async fn dynamic_expert_chains_three_calls() {
    let provider = ScriptedProvider::new(vec![
        Ok("a veteran database engineer"),
        Ok("please review this migration plan"),
        Ok("the plan looks sound"),
    ]);

    let consultation = create_and_consult_expert(
        &provider,
        &route(),
        "database migrations",
        "we need to move off our legacy schema",
    )
    .await
    .expect("chain succeeds");

    assert_eq!(consultation.persona, "a veteran database engineer");
    assert_eq!(consultation.briefing, "please review this migration plan");
    assert_eq!(consultation.response, "the plan looks sound");

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 3);
    // the final call carries the generated persona as system instruction
    assert!(
        requests[2]
            .messages
            .iter()
            .any(|msg| msg.content.contains("a veteran database engineer"))
    );
}

#[tokio::test]
async fn dynamic_expert_aborts_when_any_call_fails() {
    let provider = ScriptedProvider::new(vec![Ok("a veteran database engineer"), Err(())]);

    let result = create_and_consult_expert(
        &provider,
        &route(),
        "database migrations",
        "we need to move off our legacy schema",
    )
    .await;

    assert!(result.is_err());
    // no third call after the failure
    assert_eq!(provider.requests().await.len(), 2);
}

#[tokio::test]
async fn feature_chain_walks_all_five_experts_in_order() {
    let provider = ScriptedProvider::new(vec![
        Ok("the requirements"),
        Ok("the architecture"),
        Ok("the implementation"),
        Ok("the tests"),
        Ok("the documentation"),
    ]);

    let blueprint = develop_feature(&provider, &route(), "dark mode for the dashboard")
        .await
        .expect("chain succeeds");

    assert_eq!(blueprint.requirements, "the requirements");
    assert_eq!(blueprint.architecture, "the architecture");
    assert_eq!(blueprint.implementation, "the implementation");
    assert_eq!(blueprint.tests, "the tests");
    assert_eq!(blueprint.documentation, "the documentation");

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 5);
    assert!(requests[0].messages[0].content.contains("product manager"));
    assert!(requests[1].messages[1].content.contains("the requirements"));
    assert!(requests[4].messages[0].content.contains("technical writer"));
}
