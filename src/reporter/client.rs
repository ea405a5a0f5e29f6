use reqwest::Client;
use tracing::debug;

use crate::config::{ReporterConfig, DEFAULT_BASE_URL};
use crate::errors::{ReporterError, TransportError};
use crate::models::{CaptureReceipt, StepRecord};

/// Path of the step capture endpoint, appended to the base URL.
pub const CAPTURE_PATH: &str = "/api/capture/step";

/// Sends step records to a collection service.
///
/// Cloning is cheap and clones share the underlying connection pool. Apart from
/// the base URL, nothing is remembered between calls.
#[derive(Debug, Clone)]
pub struct StepReporter {
    client: Client,
    base_url: String,
}

impl StepReporter {
    /// Stores `base_url` verbatim; nothing is validated or connected until the
    /// first report.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Uses an existing HTTP client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ReporterConfig) -> Result<Self, ReporterError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let client = builder
            .build()
            .map_err(|e| ReporterError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config.base_url.clone(), client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CAPTURE_PATH)
    }

    /// POSTs one record as JSON and returns the decoded response body.
    ///
    /// Exactly one request per call. Any transport failure, non-2xx status or
    /// undecodable body is returned as-is; nothing is retried or cached.
    pub async fn report(&self, record: &StepRecord) -> Result<CaptureReceipt, TransportError> {
        debug!(
            agent = %record.agent_name,
            step = %record.step_name,
            status = %record.status,
            latency_ms = record.latency_ms,
            "Sending step capture"
        );

        let resp = self.client
            .post(self.endpoint())
            .json(record)
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            // The status is the error; an unreadable body just leaves it empty.
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let receipt: CaptureReceipt = resp.json().await.map_err(TransportError::Decode)?;

        debug!(
            agent = %record.agent_name,
            step = %record.step_name,
            run_id = receipt.run_id().unwrap_or("-"),
            "Step capture acknowledged"
        );
        Ok(receipt)
    }
}

impl Default for StepReporter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_capture_path_verbatim() {
        let reporter = StepReporter::new("http://localhost:3001");
        assert_eq!(reporter.endpoint(), "http://localhost:3001/api/capture/step");

        let reporter = StepReporter::new("http://host/prefix/");
        assert_eq!(reporter.base_url(), "http://host/prefix/");
        assert_eq!(reporter.endpoint(), "http://host/prefix//api/capture/step");
    }

    #[test]
    fn test_default_points_at_local_service() {
        assert_eq!(StepReporter::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_config() {
        let config = ReporterConfig::new("https://debug.example.com").with_timeout_secs(2);
        let reporter = StepReporter::from_config(&config).unwrap();
        assert_eq!(reporter.base_url(), "https://debug.example.com");
    }
}
