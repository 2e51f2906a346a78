mod error;
mod loader;
mod provider;
mod tool;

pub use error::ConfigError;
pub use loader::ensure_env_loaded;
pub use provider::{ModelInfo, ModelProviderConfig};
pub use tool::ToolConfig;

use std::path::{Path, PathBuf};

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub max_iterations: usize,
    pub memory_limit: Option<usize>,
    pub workdir: PathBuf,
    pub tools: Vec<ToolConfig>,
    pub providers: Vec<ModelProviderConfig>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        loader::load_config(path)
    }
}

/// Both file tools are enabled when the config names none.
pub(crate) fn default_tools() -> Vec<ToolConfig> {
    vec![
        ToolConfig {
            name: "list_files".to_string(),
            description: None,
        },
        ToolConfig {
            name: "read_file".to_string(),
            description: None,
        },
    ]
}
