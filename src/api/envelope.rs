//! Uniform JSON response envelope.

use axum::response::Json;
use chrono::{Local, SecondsFormat};
use serde_json::{json, Value};

/// Reported as `metadata.version` on every envelope.
pub const API_VERSION: &str = "1.0";

/// Payload format tag reported as `metadata.format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Docstring,
    PlainText,
}

impl PayloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docstring => "docstring",
            Self::PlainText => "plain-text",
        }
    }
}

/// Current local time in ISO-8601 form.
pub fn iso_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Wrap `data` in a success envelope.
pub fn success(data: Value, format: PayloadFormat) -> Json<Value> {
    Json(json!({
        "success": true,
        "timestamp": iso_timestamp(),
        "status": "success",
        "data": data,
        "metadata": {
            "processing_time": iso_timestamp(),
            "version": API_VERSION,
            "format": format.as_str(),
        }
    }))
}

/// Failure envelope body.
pub fn failure(message: &str, error_type: &str) -> Value {
    json!({
        "success": false,
        "error": message,
        "timestamp": iso_timestamp(),
        "status": "error",
        "metadata": {
            "error_type": error_type,
            "version": API_VERSION,
        }
    })
}
