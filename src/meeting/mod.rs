//! Meeting block processing.
//!
//! Parses the raw, blank-line separated meeting block into a
//! [`MeetingSummary`] and renders it as a fixed-layout text report.

pub mod formatter;
pub mod parser;
pub mod summary;

pub use formatter::{format_summary, format_summary_at, CREATED_TIME_FORMAT};
pub use parser::{parse_meeting, GuestError, ParseError};
pub use summary::{GuestRecord, HostRecord, MeetingSummary};

/// Parse a raw meeting block and render it, stamped with the current time.
pub fn process_meeting(raw: &str) -> Result<String, ParseError> {
    let summary = parse_meeting(raw)?;
    Ok(format_summary(&summary))
}
