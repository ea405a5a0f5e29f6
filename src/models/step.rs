use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Outcome of a captured step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Completed,
    Failed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prompt/response exchange of an agent, as sent to `/api/capture/step`.
///
/// Every field is always present on the wire; unset optionals go out as `null`.
/// Maps are ordered so equal records serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub agent_name: String,
    pub step_name: String,
    pub prompt: String,
    pub output: Option<String>,
    /// Template variables the prompt was rendered from.
    pub input: Option<BTreeMap<String, String>>,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub latency_ms: u64,
    /// Unit and currency are up to the caller. NaN and infinities go out as 0.
    #[serde(serialize_with = "serialize_cost")]
    pub cost: f64,
    pub status: StepStatus,
    /// Only meaningful when `status` is `Failed`.
    pub error_message: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl StepRecord {
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

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_input(mut self, input: BTreeMap<String, String>) -> Self {
        self.input = Some(input);
        self
    }

    /// Adds a single input variable, creating the input map if needed.
    pub fn with_input_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.input
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_tokens(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.prompt_tokens = prompt_tokens;
        self.completion_tokens = completion_tokens;
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
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

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Marks the step as failed with the given error message.
    pub fn failed(mut self, error_message: impl Into<String>) -> Self {
        self.status = StepStatus::Failed;
        self.error_message = Some(error_message.into());
        self
    }

    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

// JSON has no encoding for non-finite numbers; serde_json would emit null.
fn serialize_cost<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(if cost.is_finite() { *cost } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WIRE_KEYS: [&str; 12] = [
        "agentName",
        "stepName",
        "prompt",
        "output",
        "input",
        "promptTokens",
        "completionTokens",
        "latencyMs",
        "cost",
        "status",
        "errorMessage",
        "metadata",
    ];

    #[test]
    fn test_defaults_serialize_as_null_and_zero() {
        let record = StepRecord::new("MyAgent", "Summarize", "Summarize...");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "agentName": "MyAgent",
                "stepName": "Summarize",
                "prompt": "Summarize...",
                "output": null,
                "input": null,
                "promptTokens": 0,
                "completionTokens": 0,
                "latencyMs": 0,
                "cost": 0.0,
                "status": "completed",
                "errorMessage": null,
                "metadata": null,
            })
        );
    }

    #[test]
    fn test_wire_keys_exact() {
        let record = StepRecord::new("a", "s", "p")
            .with_output("o")
            .with_input_var("topic", "rust")
            .with_tokens(5, 3)
            .with_latency_ms(42)
            .with_cost(0.01)
            .with_metadata_entry("model", "gpt-4o")
            .failed("boom");
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected = WIRE_KEYS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);

        assert_eq!(obj["input"], json!({"topic": "rust"}));
        assert_eq!(obj["promptTokens"], 5);
        assert_eq!(obj["completionTokens"], 3);
        assert_eq!(obj["latencyMs"], 42);
        assert_eq!(obj["cost"], 0.01);
        assert_eq!(obj["status"], "failed");
        assert_eq!(obj["errorMessage"], "boom");
        assert_eq!(obj["metadata"], json!({"model": "gpt-4o"}));
    }

    #[test]
    fn test_nested_metadata_passes_through() {
        let mut meta = Map::new();
        meta.insert("tags".into(), json!(["a", "b"]));
        meta.insert("params".into(), json!({"temperature": 0.2, "stream": false, "stop": null}));
        let record = StepRecord::new("a", "s", "p").with_metadata(meta);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["metadata"]["tags"][1], "b");
        assert_eq!(value["metadata"]["params"]["temperature"], 0.2);
        assert!(value["metadata"]["params"]["stop"].is_null());
    }

    #[test]
    fn test_identical_records_serialize_identically() {
        let build = || {
            StepRecord::new("a", "s", "p")
                .with_input_var("z", "1")
                .with_input_var("a", "2")
                .with_metadata_entry("y", 1)
                .with_metadata_entry("b", true)
        };
        assert_eq!(
            serde_json::to_vec(&build()).unwrap(),
            serde_json::to_vec(&build()).unwrap()
        );
    }

    #[test]
    fn test_status_round_trips_from_wire() {
        let parsed: StepStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, StepStatus::Failed);
        assert_eq!(StepStatus::default().to_string(), "completed");
    }

    #[test]
    fn test_total_tokens() {
        assert_eq!(StepRecord::new("a", "s", "p").with_tokens(10, 4).total_tokens(), 14);
    }

    #[test]
    fn test_total_tokens_saturates() {
        let record = StepRecord::new("a", "s", "p").with_tokens(u64::MAX, 1);
        assert_eq!(record.total_tokens(), u64::MAX);
    }

    #[test]
    fn test_non_finite_cost_is_sent_as_zero() {
        for cost in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let value = serde_json::to_value(StepRecord::new("a", "s", "p").with_cost(cost)).unwrap();
            assert!(value["cost"].is_number(), "cost {} serialized as {}", cost, value["cost"]);
            assert_eq!(value["cost"], 0.0);
        }
        let value = serde_json::to_value(StepRecord::new("a", "s", "p").with_cost(1.5)).unwrap();
        assert_eq!(value["cost"], 1.5);
    }
}
