use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Address of a collection service running locally with its default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Reporter settings, usually loaded from YAML:
///
/// ```yaml
/// base_url: http://prompt-debug.internal:3001
/// timeout_secs: 10
/// user_agent: my-agent/1.2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReporterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout applied by the HTTP transport. None waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ReporterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
