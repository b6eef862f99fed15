//! dbx-dropbox: Dropbox API v2 adapter for the dbx CLI client
//!
//! This crate provides the implementation of the RemoteStore trait over
//! reqwest. It is the only crate that speaks HTTP to the provider.

pub mod client;
mod error;
mod wire;

pub use client::DropboxClient;
