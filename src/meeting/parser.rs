//! Parser for raw meeting blocks.
//!
//! A meeting block is four blank-line separated segments:
//!
//! ```text
//! Weekly Sync
//!
//! Organizer: Ada Lovelace
//!
//! Host: {"user_name":"Ada","user_email":"ada@example.com","user":"u1"}
//!
//! Guests: {"email":"g1@example.com"},{"email":"g2@example.com"}
//! ```
//!
//! Embedded JSON is located by scanning for the first `{` and the first `}`
//! rather than by balanced matching, so a nested object in the host JSON
//! truncates at its first closing brace. Guest strings are not scanned with
//! escape awareness either.
//!
//! The host segment is strict and fails the parse. The guest segment is
//! lenient: any problem with it yields an empty guest list.

use super::summary::{GuestRecord, HostRecord, MeetingSummary};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const SEGMENT_DELIMITER: &str = "\n\n";
/// Used when callers send the delimiter as literal escape sequences.
const ESCAPED_SEGMENT_DELIMITER: &str = "\\n\\n";

const TITLE_SEGMENT: usize = 0;
const ORGANIZER_SEGMENT: usize = 1;
const HOST_SEGMENT: usize = 2;
const GUEST_SEGMENT: usize = 3;

/// Errors that fail a meeting parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Meeting string is missing the {name} segment (segment {index})")]
    MissingSegment { index: usize, name: &'static str },

    #[error("Invalid host JSON: {0}")]
    InvalidHostJson(String),
}

impl ParseError {
    /// Stable tag reported as `error_type` in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSegment { .. } => "MissingSegment",
            Self::InvalidHostJson(_) => "InvalidHostJson",
        }
    }
}

/// Reasons a guest segment was discarded.
///
/// These never reach the caller of [`parse_meeting`]; they map to an empty
/// guest list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuestError {
    #[error("no guest segment")]
    MissingSegment,

    #[error("guest segment contains no '{{'")]
    NoObject,

    #[error("guest list is not a JSON array: {0}")]
    InvalidJson(String),

    #[error("guest {position} is not a JSON object")]
    NotAnObject { position: usize },

    #[error("guest {position} has no email")]
    MissingEmail { position: usize },
}

/// Parse a raw meeting block into a [`MeetingSummary`].
pub fn parse_meeting(raw: &str) -> Result<MeetingSummary, ParseError> {
    let segments = split_segments(raw);
    debug!("Meeting string split into {} segments", segments.len());

    let title = segment(&segments, TITLE_SEGMENT, "title")?.to_string();
    let organizer = parse_organizer(segment(&segments, ORGANIZER_SEGMENT, "organizer")?);
    let host = parse_host(segment(&segments, HOST_SEGMENT, "host")?)?;

    let guests = match parse_guests(segments.get(GUEST_SEGMENT).copied()) {
        Ok(guests) => guests,
        Err(reason) => {
            debug!("Ignoring guest segment: {}", reason);
            Vec::new()
        }
    };

    Ok(MeetingSummary {
        title,
        organizer,
        host,
        guests,
    })
}

/// Split on blank lines, falling back to the escaped `\n\n` sequence when
/// the real delimiter is absent. Every segment is trimmed.
pub fn split_segments(raw: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = raw.split(SEGMENT_DELIMITER).collect();
    if segments.len() == 1 {
        segments = raw.split(ESCAPED_SEGMENT_DELIMITER).collect();
    }
    segments.into_iter().map(str::trim).collect()
}

fn segment<'a>(
    segments: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    segments
        .get(index)
        .copied()
        .ok_or(ParseError::MissingSegment { index, name })
}

/// Text after the first colon, or the whole line when there is none.
pub fn parse_organizer(line: &str) -> String {
    match line.split_once(':') {
        Some((_, name)) => name.trim().to_string(),
        None => line.trim().to_string(),
    }
}

/// Extract the host object spanning the first `{` to the first `}`.
pub fn parse_host(segment: &str) -> Result<HostRecord, ParseError> {
    let open = segment
        .find('{')
        .ok_or_else(|| ParseError::InvalidHostJson("no '{' in host segment".to_string()))?;
    let close = segment
        .find('}')
        .ok_or_else(|| ParseError::InvalidHostJson("no '}' in host segment".to_string()))?;

    if close < open {
        return Err(ParseError::InvalidHostJson(
            "'}' appears before '{' in host segment".to_string(),
        ));
    }

    match serde_json::from_str::<Value>(&segment[open..=close]) {
        Ok(Value::Object(object)) => Ok(HostRecord::from_object(&object)),
        Ok(_) => Err(ParseError::InvalidHostJson(
            "host JSON is not an object".to_string(),
        )),
        Err(e) => Err(ParseError::InvalidHostJson(e.to_string())),
    }
}

/// Coerce the comma separated guest objects into a JSON array and read
/// each guest's email.
pub fn parse_guests(segment: Option<&str>) -> Result<Vec<GuestRecord>, GuestError> {
    let segment = segment.ok_or(GuestError::MissingSegment)?;
    let open = segment.find('{').ok_or(GuestError::NoObject)?;
    let wrapped = format!("[{}]", &segment[open..]);

    let elements = match serde_json::from_str::<Value>(&wrapped) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) => return Err(GuestError::InvalidJson("expected an array".to_string())),
        Err(e) => return Err(GuestError::InvalidJson(e.to_string())),
    };

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let position = i + 1;
            let object = element
                .as_object()
                .ok_or(GuestError::NotAnObject { position })?;
            // Non-string emails render as JSON text, like host fields.
            match object.get("email") {
                None | Some(Value::Null) => Err(GuestError::MissingEmail { position }),
                Some(Value::String(email)) => Ok(GuestRecord {
                    email: email.clone(),
                }),
                Some(other) => Ok(GuestRecord {
                    email: other.to_string(),
                }),
            }
        })
        .collect()
}
