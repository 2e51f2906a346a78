//! Routes chat requests to the backend registered for the request's
//! provider id.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use super::factory::ProviderFactory;
use super::traits::{ModelClient, ModelProvider};
use super::types::{ModelError, ModelRequest, ModelResponse};
use crate::config::ModelProviderConfig;

struct Backend {
    models: HashSet<String>,
    client: Box<dyn ModelClient>,
}

impl Backend {
    fn supports(&self, model: &str) -> bool {
        self.models.is_empty() || self.models.contains(model)
    }
}

#[derive(Default)]
pub struct ModelRouter {
    backends: HashMap<String, Backend>,
}

impl ModelRouter {
    pub fn from_configs(configs: &[ModelProviderConfig]) -> Self {
        let mut backends = HashMap::new();

        for config in configs {
            let models: HashSet<String> = config.models.iter().map(|m| m.name.clone()).collect();
            let client = ProviderFactory::create(config);
            backends.insert(config.id.clone(), Backend { models, client });
        }

        Self { backends }
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.backends.contains_key(provider)
    }
}

#[async_trait]
impl ModelProvider for ModelRouter {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let backend = self
            .backends
            .get(&request.provider)
            .ok_or_else(|| ModelError::provider_not_found(request.provider.as_str()))?;

        if !backend.supports(&request.model) {
            return Err(ModelError::model_not_found(
                request.provider.as_str(),
                request.model.as_str(),
            ));
        }

        backend.client.chat(request).await
    }
}
