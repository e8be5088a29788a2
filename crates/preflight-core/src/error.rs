use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("not initialized: run 'preflight init'")]
    NotInitialized,

    #[error("source directory not found: {0}")]
    SourceDirNotFound(String),

    #[error("manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("manifest parse error in {path}: {reason}")]
    ManifestParse { path: String, reason: String },

    #[error("invalid severity '{0}': must be 'error' or 'warning'")]
    InvalidSeverity(String),

    #[error("not an Apex trigger file: {0}")]
    NotATrigger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PreflightError>;
