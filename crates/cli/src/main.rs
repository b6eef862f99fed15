//! dbx - Dropbox CLI Client
//!
//! A command-line interface for uploading, downloading and browsing files
//! in a Dropbox account.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use dbx_cli::commands::{self, Cli};
use dbx_cli::exit_code::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for command output and JSON
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = tokio::select! {
        code = commands::execute(cli) => code,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}
