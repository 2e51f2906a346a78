use astrolabe_agent::agent::{Agent, AgentOptions};
use astrolabe_agent::cli::{Cli, RunMode};
use astrolabe_agent::config::AppConfig;
use astrolabe_agent::expert;
use astrolabe_agent::extraction;
use astrolabe_agent::model::{ModelRoute, ModelRouter};
use astrolabe_agent::tooling::{ToolRegistry, builtin_tool};
use clap::Parser;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting astrolabe");
    let cli = Cli::parse();
    debug!(?cli.mode, config = ?cli.config, model = ?cli.model, provider = ?cli.provider, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    let provider = Arc::new(ModelRouter::from_configs(&config.providers));
    let route = ModelRoute::new(
        cli.provider.clone().unwrap_or_else(|| config.default_provider.clone()),
        cli.model.clone().unwrap_or_else(|| config.model.clone()),
    );

    info!(mode = ?cli.mode, provider = route.provider.as_str(), model = route.model.as_str(), "Running in selected mode");
    match cli.mode {
        RunMode::Agent => {
            let prompt = load_prompt(&cli)?;
            let mut registry = ToolRegistry::new();
            for tool in &config.tools {
                match builtin_tool(&config.workdir, &tool.name) {
                    Some((spec, handler)) => registry.register(spec, handler),
                    None => {
                        warn!(tool = %tool.name, "Configured tool has no built-in implementation")
                    }
                }
            }

            let options = AgentOptions {
                model: None,
                system_prompt: cli.system.clone().or(config.system_prompt.clone()),
                max_iterations: cli.max_iterations.unwrap_or(config.max_iterations),
                memory_limit: config.memory_limit,
            };

            let agent = Agent::new(provider, registry, route);
            match agent.run(prompt, options).await {
                Ok(outcome) => {
                    let output = json!({
                        "run_id": outcome.run_id,
                        "response": outcome.response,
                        "halt": outcome.halt,
                        "steps": outcome.steps,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                Err(err) => {
                    eprintln!("{}", err.user_message());
                    return Err(err.into());
                }
            }
        }
        RunMode::Extract => {
            let prompt = load_prompt(&cli)?;
            let schema_path = cli
                .schema_file
                .as_deref()
                .ok_or("extract mode requires --schema-file")?;
            let schema: serde_json::Value = serde_json::from_str(&fs::read_to_string(schema_path)?)?;

            let value =
                extraction::extract_structured(provider.as_ref(), &route, &schema, &prompt).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        RunMode::Expert => {
            let prompt = load_prompt(&cli)?;
            if let Some(persona) = cli.persona.as_deref() {
                let response =
                    expert::consult_expert(provider.as_ref(), &route, persona, &prompt).await?;
                println!("{response}");
            } else if let Some(domain) = cli.domain.as_deref() {
                let consultation =
                    expert::create_and_consult_expert(provider.as_ref(), &route, domain, &prompt)
                        .await?;
                println!("{}", serde_json::to_string_pretty(&consultation)?);
            } else {
                return Err("expert mode requires --persona or --domain".into());
            }
        }
        RunMode::Blueprint => {
            let prompt = load_prompt(&cli)?;
            let blueprint = expert::develop_feature(provider.as_ref(), &route, &prompt).await?;
            println!("{}", serde_json::to_string_pretty(&blueprint)?);
        }
    }
    info!("Execution finished");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn load_prompt(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path, "Loading prompt from file");
        let content = fs::read_to_string(path)?;
        return Ok(content.trim().to_string());
    }

    if !cli.prompt.is_empty() {
        return Ok(cli.prompt.join(" ").trim().to_string());
    }

    warn!("Prompt not provided via arguments or file");
    Err("prompt required via arguments or --prompt-file".into())
}
