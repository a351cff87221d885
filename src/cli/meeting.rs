//! CLI handler for formatting a meeting string.
//!
//! Core parsing and rendering is delegated to the `meeting` module.

use crate::meeting;
use anyhow::{Context, Result};

use super::args::MeetingCliArgs;
use super::read_input;

pub fn handle_meeting_command(args: MeetingCliArgs) -> Result<()> {
    let raw = read_input(args.file.as_deref())?;

    if args.json {
        let summary = meeting::parse_meeting(&raw)?;
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize meeting")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", meeting::process_meeting(&raw)?);
    Ok(())
}
