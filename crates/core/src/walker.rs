//! Subtree enumeration
//!
//! Walks a remote folder hierarchy depth-first and collects the path of every
//! folder beneath the start, in pre-order and in the order the provider lists
//! siblings. One listing request is issued per folder, serially.

use crate::error::Error;
use crate::path::RemotePath;
use crate::traits::RemoteStore;

/// A walk that stopped at a failing listing
///
/// `partial` holds every folder discovered before the fault, in the order the
/// successful walk would have produced them.
#[derive(Debug, thiserror::Error)]
#[error("listing failed at '{path}': {source}")]
pub struct WalkError {
    /// Folders collected before the failure
    pub partial: Vec<String>,

    /// Folder whose listing failed
    pub path: String,

    /// Underlying fault
    #[source]
    pub source: Error,
}

/// Enumerate every folder beneath `start`, in pre-order
///
/// The start folder itself is not part of the result. On the first failing
/// listing the walk stops and returns what it had collected so far.
pub async fn enumerate_subtree(
    store: &dyn RemoteStore,
    start: &RemotePath,
) -> Result<Vec<String>, WalkError> {
    let mut found = Vec::new();
    // Pending folders, next-to-visit on top. The start is listed but not reported.
    let mut stack: Vec<(RemotePath, bool)> = vec![(start.clone(), false)];

    while let Some((folder, report)) = stack.pop() {
        if report {
            found.push(folder.as_api_str().to_string());
        }

        tracing::debug!(path = %folder, depth = stack.len(), "listing folder");
        let entries = match store.list_folder(&folder).await {
            Ok(entries) => entries,
            Err(source) => {
                tracing::debug!(path = %folder, error = %source, "walk stopped");
                return Err(WalkError {
                    partial: found,
                    path: folder.to_string(),
                    source,
                });
            }
        };

        let children: Vec<RemotePath> = entries
            .iter()
            .filter_map(|e| e.as_folder())
            .map(RemotePath::from)
            .collect();
        stack.extend(children.into_iter().rev().map(|child| (child, true)));
    }

    Ok(found)
}
