use crate::store::error::StoreError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "weather_collector";

pub fn get_data_dir() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .ok_or(StoreError::DataDirResolution)
        .map(|p| p.join(DATA_DIR_NAME))
}

pub async fn ensure_dir_exists(path: &Path) -> Result<(), StoreError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(StoreError::NotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating data directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| StoreError::DataDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(StoreError::DataDirCreation(path.to_path_buf(), e)),
    }
}
