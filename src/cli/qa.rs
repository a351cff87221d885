//! CLI handler for formatting a Q&A list.

use crate::qa;
use anyhow::{Context, Result};
use serde_json::Value;

use super::args::QaCliArgs;
use super::read_input;

pub fn handle_qa_command(args: QaCliArgs) -> Result<()> {
    let raw = read_input(args.file.as_deref())?;
    let value: Value = serde_json::from_str(&raw).context("QA input is not valid JSON")?;

    let entries = qa::parse_qa_list(&value)?;
    println!("{}", qa::format_qa(&entries)?);
    Ok(())
}
