//! Remote path parsing
//!
//! Dropbox addresses files by absolute, slash-separated paths. The account root
//! is written as `/` on the command line but must be sent to the API as the
//! empty string. Provider identifiers (`id:...`, `rev:...`, `ns:...`) are
//! passed through untouched.

use crate::error::{Error, Result};

const ID_PREFIXES: [&str; 3] = ["id:", "rev:", "ns:"];

/// A normalized remote path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath {
    /// Empty for the root, otherwise `/a/b` with no trailing slash
    path: String,
}

impl RemotePath {
    /// The account root
    pub fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// Parse a user-supplied path
    ///
    /// `""` and `/` are the root. A missing leading slash is added and trailing
    /// slashes are dropped. Empty, `.` and `..` segments are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if ID_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            return Ok(Self {
                path: raw.to_string(),
            });
        }

        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        for segment in body.split('/') {
            match segment {
                "" => {
                    return Err(Error::InvalidPath(format!(
                        "'{raw}' contains an empty path segment"
                    )));
                }
                "." | ".." => {
                    return Err(Error::InvalidPath(format!(
                        "'{raw}' contains a relative segment '{segment}'"
                    )));
                }
                _ => {}
            }
        }

        Ok(Self {
            path: format!("/{body}"),
        })
    }

    /// Build a path from one the provider returned; no validation is applied
    pub fn from_provider(path: impl Into<String>) -> Self {
        let path = path.into();
        if path == "/" {
            Self::root()
        } else {
            Self { path }
        }
    }

    /// Whether this is the account root
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// The path in the form the API expects (`""` for the root)
    pub fn as_api_str(&self) -> &str {
        &self.path
    }

    /// Join a single child name onto this path
    pub fn join(&self, child: &str) -> Self {
        let child = child.trim_matches('/');
        Self {
            path: format!("{}/{child}", self.path),
        }
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.path)
        }
    }
}
