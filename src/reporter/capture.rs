use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::CaptureError;
use crate::models::{StepOutput, StepRecord};
use super::client::StepReporter;

/// The caller-known part of an automatically captured step.
///
/// Output, token counts, latency and status are filled in from the wrapped
/// operation; everything here is sent unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepCapture {
    pub agent_name: String,
    pub step_name: String,
    pub prompt: String,
    pub input: Option<BTreeMap<String, String>>,
    pub cost: f64,
    pub metadata: Option<Map<String, Value>>,
}

impl StepCapture {
    pub fn new(
        agent_name: impl Into<String>,
        step_name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            step_name: step_name.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: BTreeMap<String, String>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn into_record(self, latency_ms: u64) -> StepRecord {
        StepRecord {
            agent_name: self.agent_name,
            step_name: self.step_name,
            prompt: self.prompt,
            input: self.input,
            cost: self.cost,
            metadata: self.metadata,
            latency_ms,
            ..Default::default()
        }
    }
}

impl StepReporter {
    /// Runs `operation`, times it, and reports the step either way.
    ///
    /// On success the step is reported as completed with the result's content
    /// and token counts, then the result is returned. On failure the step is
    /// reported as failed with the error's `Display` text, then the original
    /// error is returned inside [`CaptureError::Operation`], or
    /// [`CaptureError::Both`] if that report could not be delivered either.
    /// Exactly one report is sent per call.
    pub async fn capture_operation<F, Fut, T, E>(
        &self,
        agent_name: &str,
        step_name: &str,
        prompt: &str,
        input: Option<BTreeMap<String, String>>,
        operation: F,
    ) -> Result<T, CaptureError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: StepOutput,
        E: Display,
    {
        let mut capture = StepCapture::new(agent_name, step_name, prompt);
        capture.input = input;
        self.capture_step(capture, operation).await
    }

    /// Like [`capture_operation`](Self::capture_operation), with cost and
    /// metadata taken from `capture`.
    pub async fn capture_step<F, Fut, T, E>(
        &self,
        capture: StepCapture,
        operation: F,
    ) -> Result<T, CaptureError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: StepOutput,
        E: Display,
    {
        let start = Instant::now();
        let outcome = operation().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                let mut record = capture
                    .into_record(latency_ms)
                    .with_tokens(result.prompt_tokens(), result.completion_tokens());
                record.output = result.content().map(str::to_string);

                self.report(&record).await.map_err(CaptureError::Report)?;
                Ok(result)
            }
            Err(err) => {
                let message = err.to_string();
                debug!(
                    agent = %capture.agent_name,
                    step = %capture.step_name,
                    latency_ms,
                    error = %message,
                    "Captured operation failed"
                );
                let record = capture.into_record(latency_ms).failed(message);

                let report = self.report(&record).await.map(|_| ());
                Err(CaptureError::from_failure(err, report))
            }
        }
    }
}
