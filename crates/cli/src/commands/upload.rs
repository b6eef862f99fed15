//! upload and push-file commands
//!
//! `upload` stores a local file at an exact remote path; `push-file` stores it
//! inside a remote folder under its own name.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dbx_core::{RemotePath, TransferReport, ops};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Upload a local file to an exact remote path
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file to read
    pub local: PathBuf,

    /// Remote destination path, including the file name
    pub remote: String,
}

/// Upload a local file into a remote folder
#[derive(Args, Debug)]
pub struct PushFileArgs {
    /// Local file to read
    pub local: PathBuf,

    /// Remote folder to place the file in
    pub remote_dir: String,
}

#[derive(Debug, Serialize)]
struct TransferOutput {
    status: &'static str,
    #[serde(flatten)]
    report: TransferReport,
    size_human: String,
}

impl From<TransferReport> for TransferOutput {
    fn from(report: TransferReport) -> Self {
        let size_human = humansize::format_size(report.size_bytes, humansize::BINARY);
        Self {
            status: "success",
            report,
            size_human,
        }
    }
}

/// Parse a remote path argument, reporting a usage error on failure
pub(super) fn parse_remote(raw: &str, formatter: &Formatter) -> Result<RemotePath, ExitCode> {
    RemotePath::parse(raw).map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::UsageError
    })
}

fn report_transfer(formatter: &Formatter, report: TransferReport, message: String) {
    if formatter.is_json() {
        formatter.json(&TransferOutput::from(report));
    } else {
        formatter.success(&message);
    }
}

/// Execute the upload command
pub async fn execute_upload(args: UploadArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let remote = match parse_remote(&args.remote, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&ctx.output, &format!("Uploading {}", args.local.display()));
    let result = ops::upload_file(&client, &args.local, &remote).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            let message = format!(
                "Uploaded '{}' to '{}' ({})",
                report.source,
                report.target,
                humansize::format_size(report.size_bytes, humansize::BINARY)
            );
            report_transfer(&formatter, report, message);
            ExitCode::Success
        }
        Err(e) => {
            formatter.fault("Upload", &args.local.display().to_string(), &e);
            ExitCode::from_error(&e)
        }
    }
}

/// Execute the push-file command
pub async fn execute_push(args: PushFileArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let remote_dir = match parse_remote(&args.remote_dir, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(
        &ctx.output,
        &format!("Uploading {} into {remote_dir}", args.local.display()),
    );
    let result = ops::push_file(&client, &args.local, &remote_dir).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            let message = format!("File uploaded to {}", report.target);
            report_transfer(&formatter, report, message);
            ExitCode::Success
        }
        Err(e) => {
            formatter.fault("Upload", &args.local.display().to_string(), &e);
            ExitCode::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_output_json() {
        let output = TransferOutput::from(TransferReport {
            source: "local/file.txt".into(),
            target: "/dropbox/path/file.txt".into(),
            size_bytes: 2048,
        });
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["target"], "/dropbox/path/file.txt");
        assert_eq!(value["size_bytes"], 2048);
        assert_eq!(value["size_human"], "2 KiB");
    }

    #[test]
    fn test_parse_remote_rejects_bad_path() {
        let formatter = Formatter::new(crate::output::OutputConfig {
            quiet: true,
            ..Default::default()
        });
        assert_eq!(
            parse_remote("/a//b", &formatter).unwrap_err(),
            ExitCode::UsageError
        );
        assert!(parse_remote("/a/b", &formatter).is_ok());
    }
}
