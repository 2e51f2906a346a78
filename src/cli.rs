use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "astrolabe",
    version,
    about = "Tool-calling agent loop with configurable model providers"
)]
pub struct Cli {
    /// Path to the configuration file (default: config/agent.toml)
    #[arg(long)]
    pub config: Option<String>,
    /// Model override for this invocation
    #[arg(long)]
    pub model: Option<String>,
    /// Provider id override for this invocation
    #[arg(long)]
    pub provider: Option<String>,
    /// Extra system instruction appended to the agent rules
    #[arg(long)]
    pub system: Option<String>,
    /// Iteration cap override for agent mode
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Read the prompt from a file instead of the arguments
    #[arg(long)]
    pub prompt_file: Option<String>,
    /// JSON schema file for extract mode
    #[arg(long)]
    pub schema_file: Option<String>,
    /// Expert description for expert mode
    #[arg(long)]
    pub persona: Option<String>,
    /// Expertise domain for expert mode (creates the persona on the fly)
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(long, value_enum, default_value_t = RunMode::Agent)]
    pub mode: RunMode,
    #[arg()]
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunMode {
    Agent,
    Extract,
    Expert,
    Blueprint,
}
