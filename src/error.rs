use std::io;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// The path does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The filesystem refused access to the path.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// A directory was required.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// The path has no parent above the mount root.
    #[error("already at root")]
    AtRoot,

    /// Paste was requested with nothing staged.
    #[error("clipboard is empty")]
    EmptyClipboard,

    /// Path assembly would exceed the maximum path length.
    #[error("path too long ({len} > {max} bytes)")]
    Truncated { len: usize, max: usize },

    /// Generic I/O failure during copy, move, delete or rename.
    #[error("{path}: {reason}")]
    OperationFailed { path: String, reason: String },

    /// A file name that cannot be used as a single path component.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// The requested capability is not available in this build.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration or logging setup errors.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors outside the file-operation engine.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// Missing paths and permission failures keep their own variants; every
    /// other kind collapses to `OperationFailed`.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AppError::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => AppError::AccessDenied(path.to_string()),
            _ => AppError::failed(path, err),
        }
    }

    /// Build an `OperationFailed` for `path` from any displayable reason.
    pub fn failed(path: &str, reason: impl std::fmt::Display) -> Self {
        AppError::OperationFailed {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
