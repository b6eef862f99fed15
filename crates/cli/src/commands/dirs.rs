//! list-main-dirs and list-subdirs commands
//!
//! `list-main-dirs` shows the folders at the account root. `list-subdirs`
//! walks a folder depth-first and prints every folder beneath it; when a
//! listing fails part-way, the folders found so far are still printed.

use clap::Args;
use serde::Serialize;

use dbx_core::{RemotePath, enumerate_subtree, ops};

use super::Context;
use super::upload::parse_remote;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// List every folder beneath a remote folder
#[derive(Args, Debug)]
pub struct ListSubdirsArgs {
    /// Remote folder to start from (`/` for the root)
    pub path: String,
}

#[derive(Debug, Serialize)]
struct FoldersOutput<'a> {
    path: String,
    folders: &'a [String],
    complete: bool,
}

/// Execute the list-main-dirs command
pub async fn execute_main(ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match ops::list_root_folders(&client).await {
        Ok(names) => {
            if formatter.is_json() {
                formatter.json(&FoldersOutput {
                    path: RemotePath::root().to_string(),
                    folders: &names,
                    complete: true,
                });
            } else if names.is_empty() {
                formatter.println("No folders found at the root of your Dropbox");
            } else {
                formatter.heading("Main directories in your Dropbox:");
                for name in &names {
                    formatter.println(&format!("- {name}"));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.fault("Listing", "/", &e);
            ExitCode::from_error(&e)
        }
    }
}

/// Execute the list-subdirs command
pub async fn execute_subdirs(args: ListSubdirsArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let start = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&ctx.output, &format!("Walking {start}"));
    let result = enumerate_subtree(&client, &start).await;
    spinner.finish_and_clear();

    match result {
        Ok(folders) => {
            print_folders(&formatter, &start, &folders, true);
            ExitCode::Success
        }
        Err(walk) => {
            if !walk.partial.is_empty() {
                formatter.warning(&format!(
                    "Walk stopped early; showing {} folder(s) found before the failure",
                    walk.partial.len()
                ));
                print_folders(&formatter, &start, &walk.partial, false);
            } else if formatter.is_json() {
                print_folders(&formatter, &start, &walk.partial, false);
            }
            formatter.fault("Listing", &walk.path, &walk.source);
            ExitCode::from_error(&walk.source)
        }
    }
}

fn print_folders(formatter: &Formatter, start: &RemotePath, folders: &[String], complete: bool) {
    if formatter.is_json() {
        formatter.json(&FoldersOutput {
            path: start.to_string(),
            folders,
            complete,
        });
        return;
    }

    if folders.is_empty() {
        formatter.println(&format!("No subdirectories found in '{start}'"));
        return;
    }

    formatter.heading(&format!("Subdirectories in '{start}':"));
    for folder in folders {
        formatter.println(&format!("  - {folder}"));
    }
}
