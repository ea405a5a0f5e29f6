use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded body of a successful capture response.
///
/// The collection service answers with `{ "runId", "stepRunId", "agentId" }`,
/// but the body is kept as-is and never validated against that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureReceipt(Value);

impl CaptureReceipt {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// String value of a top-level key, if present and a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn run_id(&self) -> Option<&str> {
        self.get("runId")
    }

    pub fn step_run_id(&self) -> Option<&str> {
        self.get("stepRunId")
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.get("agentId")
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for CaptureReceipt {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
