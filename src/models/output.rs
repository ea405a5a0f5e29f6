use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a model call wrapped by `capture_operation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutput {
    pub content: String,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl OperationOutput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tokens(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.prompt_tokens = prompt_tokens;
        self.completion_tokens = completion_tokens;
        self
    }
}

/// What a captured step reads from an operation's successful result.
///
/// Token counts default to zero for results that do not carry them.
pub trait StepOutput {
    fn content(&self) -> Option<&str>;

    fn prompt_tokens(&self) -> u64 {
        0
    }

    fn completion_tokens(&self) -> u64 {
        0
    }
}

impl StepOutput for OperationOutput {
    fn content(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    fn completion_tokens(&self) -> u64 {
        self.completion_tokens
    }
}

impl StepOutput for String {
    fn content(&self) -> Option<&str> {
        Some(self)
    }
}

/// Loosely shaped results: `content`, `promptTokens` and `completionTokens` keys.
impl StepOutput for Value {
    fn content(&self) -> Option<&str> {
        self.get("content").and_then(Value::as_str)
    }

    fn prompt_tokens(&self) -> u64 {
        self.get("promptTokens").and_then(Value::as_u64).unwrap_or(0)
    }

    fn completion_tokens(&self) -> u64 {
        self.get("completionTokens").and_then(Value::as_u64).unwrap_or(0)
    }
}
