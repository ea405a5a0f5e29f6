use std::path::Path;

use tracing::debug;

use crate::errors::ReporterError;
use super::types::ReporterConfig;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<ReporterConfig, ReporterError> {
    if !path.exists() {
        return Err(ReporterError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ReporterError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;
    debug!(path = %path.display(), base_url = %config.base_url, "Loaded reporter config");
    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<ReporterConfig, ReporterError> {
    // An empty document means "all defaults".
    let config: ReporterConfig = if content.trim().is_empty() {
        ReporterConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ReporterConfig) -> Result<(), ReporterError> {
    let url = config.base_url.trim();
    if url.is_empty() {
        return Err(ReporterError::Config("base_url must not be empty".into()));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ReporterError::Config(format!(
            "base_url must start with http:// or https://, got '{}'",
            config.base_url
        )));
    }
    if config.timeout_secs == Some(0) {
        return Err(ReporterError::Config("timeout_secs must be greater than zero".into()));
    }
    Ok(())
}
