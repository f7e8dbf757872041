//! Error types for scanning a file.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Fatal errors. Registry lookup failures are not errors; they resolve to `"Unknown"`.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Unsupported file type: {} (expected .py, .java, .xml or requirements*.txt)", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::UnsupportedFileType(_) => 2,
            _ => 1,
        }
    }
}
