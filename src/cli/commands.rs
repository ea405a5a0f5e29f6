use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prompt-debug", version, about = "Report agent steps to a Prompt Debug service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Collection service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single step record
    Capture(CaptureArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone, Debug)]
pub struct CaptureArgs {
    /// Name of the agent producing the step
    #[arg(long)]
    pub agent: String,

    /// Name of the step within the agent's flow
    #[arg(long)]
    pub step: String,

    /// Prompt sent to the model
    #[arg(long)]
    pub prompt: String,

    /// Model output
    #[arg(long)]
    pub output: Option<String>,

    /// Input variable as key=value (repeatable)
    #[arg(long = "input", value_parser = parse_key_val)]
    pub inputs: Vec<(String, String)>,

    #[arg(long, default_value_t = 0)]
    pub prompt_tokens: u64,

    #[arg(long, default_value_t = 0)]
    pub completion_tokens: u64,

    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    #[arg(long, default_value_t = 0.0)]
    pub cost: f64,

    /// Mark the step as failed with this error message
    #[arg(long)]
    pub error: Option<String>,

    /// Free-form metadata as a JSON object
    #[arg(long)]
    pub metadata: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML configuration file
    pub config: String,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
