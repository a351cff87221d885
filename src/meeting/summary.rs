//! Structured meeting record built by the parser.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for host fields missing from the host JSON.
pub const UNKNOWN: &str = "Unknown";

/// Host details pulled out of the embedded host JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub user_name: String,
    pub user_email: String,
    /// Host user id (`user` key in the source JSON)
    pub user: String,
}

impl HostRecord {
    /// Build from a parsed JSON object, defaulting absent or null keys.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            user_name: field_or_unknown(object, "user_name"),
            user_email: field_or_unknown(object, "user_email"),
            user: field_or_unknown(object, "user"),
        }
    }
}

impl Default for HostRecord {
    fn default() -> Self {
        Self {
            user_name: UNKNOWN.to_string(),
            user_email: UNKNOWN.to_string(),
            user: UNKNOWN.to_string(),
        }
    }
}

fn field_or_unknown(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub email: String,
}

/// Everything needed to render a meeting report.
///
/// The creation time is not part of the record; it is stamped when the
/// summary is formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub title: String,
    pub organizer: String,
    pub host: HostRecord,
    pub guests: Vec<GuestRecord>,
}

impl MeetingSummary {
    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    /// Guests plus the host.
    pub fn participant_count(&self) -> usize {
        self.guests.len() + 1
    }

    pub fn has_guests(&self) -> bool {
        !self.guests.is_empty()
    }
}
