use anyhow::Result;
use clap::Parser;
use meetscribe::{
    app::{self, ServeOverrides},
    cli::{handle_meeting_command, handle_qa_command, Cli, CliCommand},
    config::Config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("meetscribe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Meeting(args)) => {
            init_tracing(cli.verbose, "warn");
            handle_meeting_command(args)
        }
        Some(CliCommand::Qa(args)) => {
            init_tracing(cli.verbose, "warn");
            handle_qa_command(args)
        }
        Some(CliCommand::Serve(args)) => {
            let overrides = ServeOverrides {
                host: args.host,
                port: args.port,
            };
            serve(cli.verbose, cli.config.as_deref(), overrides).await
        }
        None => serve(cli.verbose, cli.config.as_deref(), ServeOverrides::default()).await,
    }
}

async fn serve(
    verbose: bool,
    config_path: Option<&std::path::Path>,
    overrides: ServeOverrides,
) -> Result<()> {
    let (config, origin) = Config::load(config_path)?;
    init_tracing(verbose, &config.logging.level);
    info!("{}", origin.describe());
    app::run_service(config, overrides).await
}

/// `RUST_LOG` wins, then `--verbose`, then the given default level.
fn init_tracing(verbose: bool, default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { default_level };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
