//! RemoteStore trait definition
//!
//! This trait defines the four primitives the CLI needs from a storage provider.
//! It allows the operations and the directory walker to be decoupled from the
//! HTTP adapter, and to be tested against in-memory or mocked stores.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::RemotePath;

/// A folder record from a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Last path segment
    pub name: String,

    /// Full lower-cased path
    pub path: String,
}

/// A file record from a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Last path segment
    pub name: String,

    /// Full lower-cased path
    pub path: String,

    /// Size in bytes
    pub size: u64,

    /// Extension derived from the name, including the dot
    pub extension: String,

    /// Last modification time on the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,
}

impl FolderEntry {
    /// Create a folder entry
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl FileEntry {
    /// Create a file entry, deriving the extension from the name
    pub fn new(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = file_extension(&name).to_string();
        Self {
            name,
            path: path.into(),
            size,
            extension,
            modified: None,
        }
    }
}

/// One entry of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteEntry {
    Folder(FolderEntry),
    File(FileEntry),
}

impl RemoteEntry {
    pub fn as_folder(&self) -> Option<&FolderEntry> {
        match self {
            Self::Folder(f) => Some(f),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Self::File(f) => Some(f),
            Self::Folder(_) => None,
        }
    }
}

impl From<&FolderEntry> for RemotePath {
    fn from(folder: &FolderEntry) -> Self {
        RemotePath::from_provider(folder.path.clone())
    }
}

/// Extension of a file name: everything from the last `.` on, or `""`
///
/// Leading dots do not start an extension, so `.bashrc` has none.
pub fn file_extension(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(pos) => &name[stem_start + pos..],
        None => "",
    }
}

/// Trait for the storage provider's primitives
///
/// Implemented by the Dropbox adapter; mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// List the immediate children of a folder, in provider order
    async fn list_folder(&self, path: &RemotePath) -> Result<Vec<RemoteEntry>>;

    /// Upload bytes to a path, returning the stored file's metadata
    async fn upload(&self, path: &RemotePath, data: Vec<u8>) -> Result<FileEntry>;

    /// Download a file's metadata and content
    async fn download(&self, path: &RemotePath) -> Result<(FileEntry, Vec<u8>)>;

    /// Create a folder
    async fn create_folder(&self, path: &RemotePath) -> Result<FolderEntry>;
}
