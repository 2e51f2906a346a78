//! Persona-prefixed consultations: fixed experts, on-the-fly personas,
//! and the expert chain that walks a feature request to documentation.

use crate::domain::types::{ChatMessage, MessageRole};
use crate::infrastructure::model::{ModelError, ModelProvider, ModelRequest, ModelRoute};
use serde::Serialize;
use tracing::{debug, info};

/// One call with the persona injected as the system instruction. Returns
/// the raw response verbatim; no retry.
pub async fn consult_expert<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    persona: &str,
    prompt: &str,
) -> Result<String, ModelError> {
    debug!("Consulting expert persona");

    let request = ModelRequest::new(
        route,
        vec![
            ChatMessage::new(
                MessageRole::System,
                format!("Act as the following expert and respond accordingly: {persona}"),
            ),
            ChatMessage::new(MessageRole::User, prompt),
        ],
    );

    let response = provider.chat(request).await?;
    Ok(response.message.content)
}

/// Result of a dynamically created consultation.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicConsultation {
    pub persona: String,
    pub briefing: String,
    pub response: String,
}

/// Three chained calls: generate a persona description, generate a
/// consultation prompt, then consult. Nothing is cached between the
/// steps and any failing call aborts the whole chain.
pub async fn create_and_consult_expert<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    domain: &str,
    problem: &str,
) -> Result<DynamicConsultation, ModelError> {
    info!(domain, "Creating expert persona on the fly");

    let persona_prompt = format!(
        "Create a detailed description of an expert in {domain} who would be \
ideally suited to address the following problem:\n\n{problem}\n\n\
Your description should include:\n\
- The expert's background and experience\n\
- Their specific areas of specialization within {domain}\n\
- Their approach to problem-solving\n\
- The unique perspective they bring to this type of challenge"
    );
    let persona = ask(provider, route, &persona_prompt).await?;

    let briefing_prompt = format!(
        "Create a detailed consultation prompt for an expert in {domain} \
addressing the following problem:\n\n{problem}\n\n\
The prompt should guide the expert to provide comprehensive insights and \
actionable recommendations specific to this problem."
    );
    let briefing = ask(provider, route, &briefing_prompt).await?;

    let response = consult_expert(provider, route, &persona, &briefing).await?;

    Ok(DynamicConsultation {
        persona,
        briefing,
        response,
    })
}

/// What the expert chain produces for a feature request.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureBlueprint {
    pub requirements: String,
    pub architecture: String,
    pub implementation: String,
    pub tests: String,
    pub documentation: String,
}

/// Walks a feature request through five expert personas, each consuming
/// the previous output. Sequential by design; a failure anywhere aborts
/// the chain.
pub async fn develop_feature<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    feature_request: &str,
) -> Result<FeatureBlueprint, ModelError> {
    info!("Running expert chain for feature request");

    let requirements = consult_expert(
        provider,
        route,
        "product manager expert",
        &format!("Convert this feature request into detailed requirements: {feature_request}"),
    )
    .await?;

    let architecture = consult_expert(
        provider,
        route,
        "software architect expert",
        &format!("Design an architecture for these requirements: {requirements}"),
    )
    .await?;

    let implementation = consult_expert(
        provider,
        route,
        "senior developer expert",
        &format!("Implement code for this architecture: {architecture}"),
    )
    .await?;

    let tests = consult_expert(
        provider,
        route,
        "QA engineer expert",
        &format!("Create test cases for this implementation: {implementation}"),
    )
    .await?;

    let documentation = consult_expert(
        provider,
        route,
        "technical writer expert",
        &format!("Document this implementation: {implementation}"),
    )
    .await?;

    Ok(FeatureBlueprint {
        requirements,
        architecture,
        implementation,
        tests,
        documentation,
    })
}

async fn ask<P: ModelProvider>(
    provider: &P,
    route: &ModelRoute,
    prompt: &str,
) -> Result<String, ModelError> {
    let request = ModelRequest::new(route, vec![ChatMessage::new(MessageRole::User, prompt)]);
    let response = provider.chat(request).await?;
    Ok(response.message.content)
}
