//! Dropbox API v2 request and response bodies
//!
//! Only the fields the CLI reads are modeled; everything else in a response is
//! ignored by serde.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use dbx_core::{FileEntry, FolderEntry, RemoteEntry, Result};

/// Argument for routes that take only a path
#[derive(Debug, Serialize)]
pub(crate) struct PathArg<'a> {
    pub path: &'a str,
}

/// Argument for `files/upload`
#[derive(Debug, Serialize)]
pub(crate) struct UploadArg<'a> {
    pub path: &'a str,
    pub mode: &'static str,
    pub autorename: bool,
    pub mute: bool,
}

/// Argument for `files/create_folder_v2`
#[derive(Debug, Serialize)]
pub(crate) struct CreateFolderArg<'a> {
    pub path: &'a str,
    pub autorename: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileMetadata {
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    pub size: u64,
    #[serde(default)]
    pub server_modified: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FolderMetadata {
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub(crate) enum Metadata {
    File(FileMetadata),
    Folder(FolderMetadata),
    Deleted {
        #[allow(dead_code)]
        name: String,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFolderResult {
    pub entries: Vec<Metadata>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateFolderResult {
    pub metadata: FolderMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error_summary: String,
}

fn entry_path(lower: Option<String>, display: Option<String>, name: &str) -> String {
    lower
        .or(display.map(|d| d.to_lowercase()))
        .unwrap_or_else(|| format!("/{}", name.to_lowercase()))
}

impl From<FileMetadata> for FileEntry {
    fn from(meta: FileMetadata) -> Self {
        let path = entry_path(meta.path_lower, meta.path_display, &meta.name);
        let mut entry = FileEntry::new(meta.name, path, meta.size);
        entry.modified = meta
            .server_modified
            .and_then(|raw| raw.parse::<jiff::Timestamp>().ok());
        entry
    }
}

impl From<FolderMetadata> for FolderEntry {
    fn from(meta: FolderMetadata) -> Self {
        let path = entry_path(meta.path_lower, meta.path_display, &meta.name);
        FolderEntry::new(meta.name, path)
    }
}

impl Metadata {
    /// Convert to a core entry; deleted records have none
    pub(crate) fn into_entry(self) -> Option<RemoteEntry> {
        match self {
            Metadata::File(f) => Some(RemoteEntry::File(f.into())),
            Metadata::Folder(f) => Some(RemoteEntry::Folder(f.into())),
            Metadata::Deleted { .. } => None,
        }
    }
}

/// Encode an argument for the `Dropbox-API-Arg` header
///
/// Header values must be ASCII, so DEL and every non-ASCII character is
/// written as a `\uXXXX` escape (surrogate pairs above the BMP).
pub(crate) fn header_arg<T: Serialize>(arg: &T) -> Result<String> {
    let json = serde_json::to_string(arg)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && c != '\x7f' {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    Ok(out)
}
