mod adapter;
mod clients;
mod factory;
mod router;
mod traits;
mod types;

pub use clients::{GeminiClient, OllamaClient, OpenAIClient};
pub use factory::{ProviderFactory, resolve_api_key};
pub use router::ModelRouter;
pub use traits::{ModelClient, ModelProvider};
pub use types::{ModelError, ModelRequest, ModelResponse, ModelRoute};
