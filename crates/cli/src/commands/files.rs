//! list-files command - List files in a folder
//!
//! Shows name, size and extension for each file directly inside a folder.
//! Subfolders are not shown.

use clap::Args;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use dbx_core::{FileInfo, RemotePath, ops};

use super::Context;
use super::upload::parse_remote;
use crate::exit_code::ExitCode;

/// List the files in a remote folder
#[derive(Args, Debug)]
pub struct ListFilesArgs {
    /// Remote folder (`/` for the root)
    pub path: String,

    /// One line per file instead of a table
    #[arg(long)]
    pub plain: bool,
}

#[derive(Debug, Serialize)]
struct FilesOutput<'a> {
    path: String,
    files: &'a [FileInfo],
    total_size_bytes: u64,
}

/// Execute the list-files command
pub async fn execute(args: ListFilesArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let dir = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match ctx.connect(&formatter) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let files = match ops::list_files(&client, &dir).await {
        Ok(files) => files,
        Err(e) => {
            formatter.fault("Listing", &dir.to_string(), &e);
            return ExitCode::from_error(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&FilesOutput {
            path: dir.to_string(),
            files: &files,
            total_size_bytes: files.iter().map(|f| f.size).sum(),
        });
    } else if files.is_empty() {
        formatter.println(&format!("No files found in '{dir}'"));
    } else if args.plain {
        for line in plain_lines(&files) {
            formatter.println(&line);
        }
    } else {
        formatter.heading(&format!("Files in '{dir}':"));
        formatter.println(&render_table(&dir, &files).to_string());
    }

    ExitCode::Success
}

fn plain_lines(files: &[FileInfo]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            format!(
                "Name: {}, Size: {} bytes, Extension: {}",
                f.name, f.size, f.extension
            )
        })
        .collect()
}

fn render_table(dir: &RemotePath, files: &[FileInfo]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Size", "Extension", "Modified"]);

    for file in files {
        let modified = file
            .modified
            .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            file.name.clone(),
            humansize::format_size(file.size, humansize::BINARY),
            file.extension.clone(),
            modified,
        ]);
    }

    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    tracing::debug!(path = %dir, rows = files.len(), "rendered file table");
    table
}
