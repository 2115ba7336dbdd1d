use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobTrackError {
    #[error("Storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to persist records to {}: {source}", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl JobTrackError {
    pub fn storage_unavailable<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::StorageUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn persistence_failure<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::PersistenceFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Short, stable name for the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::PersistenceFailure { .. } => "persistence_failure",
            Self::UnknownOperation(_) => "unknown_operation",
            Self::MalformedInput(_) => "malformed_input",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, JobTrackError>;
