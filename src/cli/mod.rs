pub mod commands;
pub mod capture;
pub mod validate;

use std::path::PathBuf;

use prompt_debug::{parse_config, ReporterConfig, ReporterError, StepReporter};

pub use commands::{Cli, Commands};

/// Builds the reporter from `--config` and `--url`; the URL flag wins.
pub async fn resolve_reporter(
    config: Option<&str>,
    url: Option<&str>,
) -> Result<StepReporter, ReporterError> {
    let mut reporter_config = match config {
        Some(path) => parse_config(&PathBuf::from(path)).await?,
        None => ReporterConfig::default(),
    };
    if let Some(url) = url {
        reporter_config.base_url = url.to_string();
    }
    StepReporter::from_config(&reporter_config)
}
