//! create-subdir command - Create a remote folder

use clap::Args;
use serde::Serialize;

use dbx_core::{FolderEntry, RemotePath, ops};

use super::Context;
use super::upload::parse_remote;
use crate::exit_code::ExitCode;

/// Create a folder at a remote path
#[derive(Args, Debug)]
pub struct CreateSubdirArgs {
    /// Remote path of the folder to create
    pub path: String,
}

#[derive(Debug, Serialize)]
struct CreateOutput {
    status: &'static str,
    name: String,
    /// Path as the user wrote it, keeping its case
    path: String,
}

impl CreateOutput {
    fn new(requested: &RemotePath, created: FolderEntry) -> Self {
        Self {
            status: "success",
            name: created.name,
            path: requested.to_string(),
        }
    }
}

/// Execute the create-subdir command
pub async fn execute(args: CreateSubdirArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match ops::create_folder(&client, &path).await {
        Ok(folder) => {
            let output = CreateOutput::new(&path, folder);
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.success(&format!("Directory created at {}", output.path));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.fault("Create", &path.to_string(), &e);
            ExitCode::from_error(&e)
        }
    }
}
