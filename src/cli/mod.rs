use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

pub mod args;
pub mod meeting;
pub mod qa;

pub use args::{Cli, CliCommand, MeetingCliArgs, QaCliArgs, ServeCliArgs};
pub use meeting::handle_meeting_command;
pub use qa::handle_qa_command;

/// Read command input from a file, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
