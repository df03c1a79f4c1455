use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to determine data directory")]
    DataDirResolution,

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Data path exists but is not a directory: '{0}'")]
    NotADirectory(PathBuf),

    #[error("Failed to write to '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize record")]
    Serialize(#[from] serde_json::Error),
}
