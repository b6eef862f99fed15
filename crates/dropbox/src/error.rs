//! Translation of HTTP failures into core errors
//!
//! Dropbox reports route errors as HTTP 409 with a JSON body whose
//! `error_summary` is a slash-separated tag path such as
//! `path/not_found/..`. Other statuses carry plain text or a similar body.

use dbx_core::{Error, RemotePath};

use crate::wire::ApiErrorBody;

/// Map a non-success response to an error naming the path involved
pub(crate) fn from_status(status: u16, body: &str, path: &RemotePath) -> Error {
    let summary = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error_summary,
        Err(_) => body.trim().to_string(),
    };
    let summary = if summary.is_empty() {
        format!("HTTP {status}")
    } else {
        summary
    };

    match status {
        401 => Error::Auth(format!("access token rejected: {summary}")),
        403 => Error::Auth(format!("access to '{path}' denied: {summary}")),
        409 if summary.contains("not_found") => Error::NotFound(format!("{path} ({summary})")),
        409 if summary.contains("conflict") => Error::Conflict(format!("{path} ({summary})")),
        429 => Error::Network(format!("rate limited: {summary}")),
        500..=599 => Error::Network(format!("server error {status}: {summary}")),
        _ => Error::Api(format!("'{path}': {summary}")),
    }
}

/// Map a transport-level failure (connect, timeout, body read)
pub(crate) fn from_transport(err: reqwest::Error, path: &RemotePath) -> Error {
    if err.is_timeout() {
        Error::Network(format!("request for '{path}' timed out"))
    } else if err.is_decode() {
        Error::Api(format!("unexpected response for '{path}': {err}"))
    } else {
        Error::Network(format!("request for '{path}' failed: {err}"))
    }
}
