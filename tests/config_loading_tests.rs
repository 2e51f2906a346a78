// Config loading tests - testing AppConfig::load error handling
//
// Tests focused on configuration file loading and validation errors.

use astrolabe_agent::config::{AppConfig, ConfigError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("agent.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

const PROVIDER_BLOCK: &str = r#"
[[providers]]
id = "ollama"
type = "ollama"
endpoint = "http://127.0.0.1:11434"
models = ["llama3"]
"#;

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/agent.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn returns_error_when_model_missing() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        &format!("default_provider = \"ollama\"\n{PROVIDER_BLOCK}"),
    );

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::MissingModel)));
}

#[test]
fn returns_error_when_default_provider_missing() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), &format!("model = \"llama3\"\n{PROVIDER_BLOCK}"));

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::MissingDefaultProvider)));
}

#[test]
fn returns_error_when_no_providers_configured() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
model = "llama3"
default_provider = "ollama"
"#,
    );

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::NoProvidersConfigured)));
}

#[test]
fn returns_error_when_default_provider_unknown() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        &format!("model = \"llama3\"\ndefault_provider = \"missing\"\n{PROVIDER_BLOCK}"),
    );

    let result = AppConfig::load(Some(&path));
    assert!(matches!(
        result,
        Err(ConfigError::ProviderNotFound { provider }) if provider == "missing"
    ));
}

#[test]
fn returns_error_when_provider_endpoint_missing() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
model = "llama3"
default_provider = "ollama"

[[providers]]
id = "ollama"
type = "ollama"
models = ["llama3"]
"#,
    );

    let result = AppConfig::load(Some(&path));
    assert!(matches!(
        result,
        Err(ConfigError::MissingEndpoint { provider }) if provider == "ollama"
    ));
}

#[test]
fn returns_error_when_iteration_cap_is_zero() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        &format!(
            "model = \"llama3\"\ndefault_provider = \"ollama\"\nmax_iterations = 0\n{PROVIDER_BLOCK}"
        ),
    );

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::InvalidIterationCap)));
}

#[test]
fn parses_full_configuration() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
model = "gemini-2.0-flash"
default_provider = "gemini"
system_prompt = "keep answers short"
max_iterations = 12
memory_limit = 40
workdir = "~/workspace"

tools = [
    "list_files",
    { name = "read_file", description = "Read one file" }
]

[[providers]]
id = "gemini"
type = "gemini"
endpoint = "https://generativelanguage.googleapis.com"
api_key = "${GEMINI_API_KEY}"
models = [
    { name = "gemini-2.0-flash", display_name = "Gemini 2.0 Flash" }
]

[[providers]]
id = "ollama"
type = "ollama"
endpoint = "http://127.0.0.1:11434"
models = ["llama3"]
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.default_provider, "gemini");
    assert_eq!(config.system_prompt.as_deref(), Some("keep answers short"));
    assert_eq!(config.max_iterations, 12);
    assert_eq!(config.memory_limit, Some(40));
    assert!(config.workdir.to_string_lossy().ends_with("workspace"));

    assert_eq!(config.tools.len(), 2);
    assert_eq!(config.tools[0].name, "list_files");
    assert!(config.tools[0].description.is_none());
    assert_eq!(config.tools[1].description.as_deref(), Some("Read one file"));

    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers[0].provider_type, "gemini");
    assert_eq!(
        config.providers[0].api_key.as_deref(),
        Some("${GEMINI_API_KEY}")
    );
}

#[test]
fn defaults_fill_in_optional_fields() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        &format!("model = \"llama3\"\ndefault_provider = \"ollama\"\n{PROVIDER_BLOCK}"),
    );

    let config = AppConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.max_iterations, 8);
    assert!(config.memory_limit.is_none());
    assert!(config.system_prompt.is_none());
    // both file tools are enabled by default
    assert_eq!(config.tools.len(), 2);
    // the configured model is ensured on the default provider
    assert!(
        config.providers[0]
            .models
            .iter()
            .any(|info| info.name == "llama3")
    );
}
