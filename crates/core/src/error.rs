//! Error types for dbx-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes
//! and classified into a fault category.

use thiserror::Error;

/// Result type alias for dbx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Where a fault originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    /// The local file or directory an operation needed is missing or unusable
    LocalNotFound,

    /// The storage provider (or the path to it) reported a fault
    Remote,
}

impl std::fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalNotFound => write!(f, "local resource not found"),
            Self::Remote => write!(f, "remote provider fault"),
        }
    }
}

/// Error types for dbx-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Local file or directory does not exist
    #[error("Local file not found: {0}")]
    LocalNotFound(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Remote resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Provider rejected the request
    #[error("API error: {0}")]
    Api(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) => 2,                                      // UsageError
            Error::Config(_) | Error::InvalidUrl(_) => 2,                    // UsageError
            Error::Network(_) => 3,                                          // NetworkError
            Error::Auth(_) => 4,                                             // AuthError
            Error::NotFound(_) | Error::ProfileNotFound(_) => 5,             // NotFound
            Error::LocalNotFound(_) => 5,                                    // NotFound
            Error::Conflict(_) => 6,                                         // Conflict
            _ => 1,                                                          // GeneralError
        }
    }

    /// Classify the error as a local or a remote fault
    pub const fn category(&self) -> FaultCategory {
        match self {
            Error::LocalNotFound(_) | Error::Io(_) => FaultCategory::LocalNotFound,
            _ => FaultCategory::Remote,
        }
    }

    /// Convert a local I/O error, folding the missing-path case into `LocalNotFound`
    pub fn local(path: impl std::fmt::Display, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::LocalNotFound(path.to_string())
        } else {
            Error::Io(std::io::Error::new(err.kind(), format!("{path}: {err}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidPath("test".into()).exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::LocalNotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::ProfileNotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::Api("test".into()).exit_code(), 1);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::LocalNotFound("a.txt".into()).category(),
            FaultCategory::LocalNotFound
        );
        assert_eq!(Error::Network("reset".into()).category(), FaultCategory::Remote);
        assert_eq!(Error::NotFound("/x".into()).category(), FaultCategory::Remote);
        assert_eq!(Error::Api("bad".into()).category(), FaultCategory::Remote);
    }

    #[test]
    fn test_local_folds_not_found() {
        let err = Error::local(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, Error::LocalNotFound(ref p) if p == "missing.txt"));

        let err = Error::local(
            "locked.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), FaultCategory::LocalNotFound);
        assert!(err.to_string().contains("locked.txt"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::ProfileNotFound("work".into());
        assert_eq!(err.to_string(), "Profile not found: work");

        let err = Error::LocalNotFound("/tmp/none.txt".into());
        assert_eq!(err.to_string(), "Local file not found: /tmp/none.txt");
    }
}
