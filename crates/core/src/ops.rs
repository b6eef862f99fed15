//! Single-call operations
//!
//! Each operation makes at most one provider call. Local preconditions are
//! checked first, so a missing local file or directory fails with
//! [`Error::LocalNotFound`] before anything is sent.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::{FolderEntry, RemoteStore};

/// Outcome of an upload or download
#[derive(Debug, Clone, Serialize)]
pub struct TransferReport {
    /// Where the bytes came from
    pub source: String,

    /// Where the bytes went
    pub target: String,

    /// Number of bytes moved
    pub size_bytes: u64,
}

/// A file in a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<jiff::Timestamp>,
}

async fn read_local(path: &Path) -> Result<Vec<u8>> {
    if path.is_dir() {
        return Err(Error::local(
            path.display(),
            io::Error::new(io::ErrorKind::IsADirectory, "is a directory, not a file"),
        ));
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| Error::local(path.display(), e))
}

/// Upload a local file to an exact remote path
pub async fn upload_file(
    store: &dyn RemoteStore,
    local: &Path,
    remote: &RemotePath,
) -> Result<TransferReport> {
    if remote.is_root() {
        return Err(Error::InvalidPath("cannot upload onto the root folder".into()));
    }

    let data = read_local(local).await?;
    tracing::debug!(local = %local.display(), remote = %remote, bytes = data.len(), "uploading");

    let stored = store.upload(remote, data).await?;
    Ok(TransferReport {
        source: local.display().to_string(),
        target: remote.to_string(),
        size_bytes: stored.size,
    })
}

/// Upload a local file into a remote folder, keeping its file name
pub async fn push_file(
    store: &dyn RemoteStore,
    local: &Path,
    remote_dir: &RemotePath,
) -> Result<TransferReport> {
    let file_name = local
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::local(
                local.display(),
                io::Error::new(io::ErrorKind::InvalidInput, "no usable file name"),
            )
        })?;

    upload_file(store, local, &remote_dir.join(file_name)).await
}

/// Download a remote file into a local directory, keeping its remote name
pub async fn download_file(
    store: &dyn RemoteStore,
    remote: &RemotePath,
    local_dir: &Path,
) -> Result<TransferReport> {
    if !local_dir.is_dir() {
        return Err(Error::LocalNotFound(local_dir.display().to_string()));
    }

    let (meta, data) = store.download(remote).await?;
    let name = Path::new(&meta.name)
        .file_name()
        .ok_or_else(|| Error::Api(format!("provider returned unusable name '{}'", meta.name)))?;
    let local_path: PathBuf = local_dir.join(name);

    tokio::fs::write(&local_path, &data)
        .await
        .map_err(|e| Error::local(local_path.display(), e))?;
    tracing::debug!(remote = %remote, local = %local_path.display(), bytes = data.len(), "downloaded");

    Ok(TransferReport {
        source: remote.to_string(),
        target: local_path.display().to_string(),
        size_bytes: data.len() as u64,
    })
}

/// Names of the folders directly under the root
pub async fn list_root_folders(store: &dyn RemoteStore) -> Result<Vec<String>> {
    let entries = store.list_folder(&RemotePath::root()).await?;
    Ok(entries
        .into_iter()
        .filter_map(|e| e.as_folder().map(|f| f.name.clone()))
        .collect())
}

/// Files directly inside a folder, with size and extension
pub async fn list_files(store: &dyn RemoteStore, dir: &RemotePath) -> Result<Vec<FileInfo>> {
    let entries = store.list_folder(dir).await?;
    Ok(entries
        .into_iter()
        .filter_map(|e| {
            e.as_file().map(|f| FileInfo {
                name: f.name.clone(),
                path: f.path.clone(),
                size: f.size,
                extension: f.extension.clone(),
                modified: f.modified,
            })
        })
        .collect())
}

/// Create a folder
pub async fn create_folder(store: &dyn RemoteStore, path: &RemotePath) -> Result<FolderEntry> {
    if path.is_root() {
        return Err(Error::InvalidPath("the root folder already exists".into()));
    }
    store.create_folder(path).await
}
