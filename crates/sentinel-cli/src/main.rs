mod cmd;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use settings::SentinelArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sentinel",
    about = "API Sentinel: diagnose API incidents and propose fixes with an LLM",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    settings: SentinelArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (/health, /, /run_incident)
    Serve {
        /// Interface to bind
        #[arg(long, env = "SENTINEL_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long, env = "SENTINEL_PORT", default_value = "8000")]
        port: u16,
    },

    /// Run one incident from a JSON file and print the result
    Run {
        /// Incident JSON file; either the bare incident or `{"incident": {...}}`
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = cli.settings.into_config().and_then(|config| match cli.command {
        Commands::Serve { host, port } => cmd::serve::run(config, &host, port),
        Commands::Run { path } => cmd::run::run(config, &path),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
