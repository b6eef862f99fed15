//! dbx-core: Core library for the dbx Dropbox CLI client
//!
//! This crate provides the core functionality for the dbx CLI, including:
//! - Configuration and profile management
//! - Remote path normalization
//! - RemoteStore trait for provider operations
//! - Subtree enumeration and the single-call file operations
//!
//! This crate is independent of the HTTP adapter, so every operation can be
//! exercised against an in-memory or mocked store.

pub mod config;
pub mod error;
pub mod ops;
pub mod path;
pub mod profile;
pub mod traits;
pub mod walker;

pub use config::{Config, ConfigManager};
pub use error::{Error, FaultCategory, Result};
pub use ops::{FileInfo, TransferReport};
pub use path::RemotePath;
pub use profile::{Profile, ProfileManager, TimeoutConfig};
pub use traits::{FileEntry, FolderEntry, RemoteEntry, RemoteStore, file_extension};
pub use walker::{WalkError, enumerate_subtree};
