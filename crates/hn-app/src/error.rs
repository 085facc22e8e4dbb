//! Error types for the hn-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives every frontend one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {}", path.display())]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {}", path.display())]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported project file extension: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Failed to read INP file: {}", path.display())]
    InpFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write INP file: {}", path.display())]
    InpFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("INP input {name} contains no valid network elements")]
    EmptyImport { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hn-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<hn_project::ProjectError> for AppError {
    fn from(err: hn_project::ProjectError) -> Self {
        match err {
            hn_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<hn_project::ValidationError> for AppError {
    fn from(err: hn_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hn_graph::GraphError> for AppError {
    fn from(err: hn_graph::GraphError) -> Self {
        AppError::Validation(err.to_string())
    }
}
