//! retrieve-file command - Download a file
//!
//! Writes a remote file into a local directory under its remote name.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dbx_core::ops;

use super::Context;
use super::upload::parse_remote;
use crate::exit_code::ExitCode;
use crate::output::ProgressBar;

/// Download a remote file into a local directory
#[derive(Args, Debug)]
pub struct RetrieveFileArgs {
    /// Remote file to download
    pub remote: String,

    /// Existing local directory to write into
    pub local_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct DownloadOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
}

/// Execute the retrieve-file command
pub async fn execute(args: RetrieveFileArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let remote = match parse_remote(&args.remote, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&ctx.output, &format!("Downloading {remote}"));
    let result = ops::download_file(&client, &remote, &args.local_dir).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            if formatter.is_json() {
                formatter.json(&DownloadOutput {
                    status: "success",
                    source: report.source,
                    target: report.target,
                    size_bytes: report.size_bytes,
                });
            } else {
                formatter.success(&format!("File downloaded to {}", report.target));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.fault("Download", &remote.to_string(), &e);
            ExitCode::from_error(&e)
        }
    }
}
