use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetscribe")]
#[command(about = "Format meeting blocks and Q&A lists as plain text", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: <config dir>/meetscribe/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API (the default when no command is given)
    Serve(ServeCliArgs),
    /// Format a raw meeting string
    Meeting(MeetingCliArgs),
    /// Format a JSON array of question/answer objects
    Qa(QaCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ServeCliArgs {
    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug)]
pub struct MeetingCliArgs {
    /// File holding the meeting string (reads stdin when omitted)
    pub file: Option<PathBuf>,
    /// Print the parsed record as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug)]
pub struct QaCliArgs {
    /// File holding the JSON array (reads stdin when omitted)
    pub file: Option<PathBuf>,
}
