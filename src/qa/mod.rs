//! Question/answer list formatting.
//!
//! Unlike guest parsing, malformed entries here are errors rather than
//! being silently defaulted.

use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_QUESTION: &str = "No question provided";
pub const DEFAULT_ANSWER: &str = "No answer provided";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QaError {
    #[error("QA list must be a JSON array: {0}")]
    InvalidQaList(String),

    #[error("QA entry {position} is not a JSON object")]
    InvalidEntry { position: usize },
}

impl QaError {
    /// Stable tag reported as `error_type` in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQaList(_) => "InvalidQaList",
            Self::InvalidEntry { .. } => "InvalidEntry",
        }
    }
}

/// Accept either an already-decoded JSON array or a string holding one.
pub fn parse_qa_list(value: &Value) -> Result<Vec<Value>, QaError> {
    match value {
        Value::Array(entries) => Ok(entries.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(other) => Err(QaError::InvalidQaList(format!(
                "got {}",
                json_type_name(&other)
            ))),
            Err(e) => Err(QaError::InvalidQaList(e.to_string())),
        },
        other => Err(QaError::InvalidQaList(format!(
            "got {}",
            json_type_name(other)
        ))),
    }
}

/// Render entries as numbered `Q{i}`/`A{i}` pairs separated by blank lines.
pub fn format_qa(entries: &[Value]) -> Result<String, QaError> {
    let mut blocks = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let position = i + 1;
        let object = entry
            .as_object()
            .ok_or(QaError::InvalidEntry { position })?;

        let question = text_or(object.get("question"), DEFAULT_QUESTION);
        let answer = text_or(object.get("answer"), DEFAULT_ANSWER);
        blocks.push(format!(
            "Q{position}: {question}\nA{position}: {answer}\n"
        ));
    }

    Ok(blocks.join("\n").trim().to_string())
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
