//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Every remote command builds one Dropbox client from the resolved
//! credential, runs a single core operation, and reports the outcome.

use clap::{Parser, Subcommand};

use dbx_core::ConfigManager;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod context;
mod dirs;
mod download;
mod files;
mod mkdir;
mod profile;
mod upload;

pub use context::Context;

/// dbx - Dropbox CLI Client
///
/// Upload, download and browse files in a Dropbox account from the command line.
#[derive(Parser, Debug)]
#[command(name = "dbx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Stored profile to use
    #[arg(long, global = true, env = "DBX_PROFILE", default_value = "default")]
    pub profile: String,

    /// Access token; overrides the token stored in the profile
    #[arg(long, global = true, env = "DBX_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local file to an exact remote path
    Upload(upload::UploadArgs),

    /// List the folders at the root of the account
    #[command(visible_alias = "list_main_dirs")]
    ListMainDirs,

    /// List every folder beneath a remote folder, depth-first
    #[command(visible_alias = "list_subdirs")]
    ListSubdirs(dirs::ListSubdirsArgs),

    /// Upload a local file into a remote folder, keeping its name
    #[command(visible_alias = "push_file")]
    PushFile(upload::PushFileArgs),

    /// List the files in a remote folder with size and extension
    #[command(visible_alias = "list_files")]
    ListFiles(files::ListFilesArgs),

    /// Download a remote file into a local directory
    #[command(visible_alias = "retrieve_file")]
    RetrieveFile(download::RetrieveFileArgs),

    /// Create a remote folder
    #[command(visible_alias = "create_subdir")]
    CreateSubdir(mkdir::CreateSubdirArgs),

    /// Manage stored credentials
    #[command(subcommand)]
    Profile(profile::ProfileCommands),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let defaults = match ConfigManager::new().and_then(|m| m.load()) {
        Ok(config) => config.defaults,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable configuration defaults");
            Default::default()
        }
    };

    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        force_color: false,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    }
    .with_defaults(&defaults);
    output_config.apply_color_mode();

    let ctx = Context::new(output_config, cli.profile, cli.token);

    match cli.command {
        Commands::Upload(args) => upload::execute_upload(args, &ctx).await,
        Commands::ListMainDirs => dirs::execute_main(&ctx).await,
        Commands::ListSubdirs(args) => dirs::execute_subdirs(args, &ctx).await,
        Commands::PushFile(args) => upload::execute_push(args, &ctx).await,
        Commands::ListFiles(args) => files::execute(args, &ctx).await,
        Commands::RetrieveFile(args) => download::execute(args, &ctx).await,
        Commands::CreateSubdir(args) => mkdir::execute(args, &ctx).await,
        Commands::Profile(cmd) => profile::execute(cmd, &ctx),
    }
}
