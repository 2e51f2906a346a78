use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Anything that can answer a chat request. The agent loop, extraction
/// helper, and expert consultations only ever talk to this trait.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// A single concrete backend (one HTTP API format).
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn id(&self) -> &str;

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
