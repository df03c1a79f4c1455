//! Appends every payload as one JSON line to a file per provider and data kind.

use crate::store::error::StoreError;
use crate::store::{StoredRecord, WeatherStore};
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use crate::utils::{ensure_dir_exists, get_data_dir};
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Stores records in `<dir>/<provider>-current.jsonl` and `<dir>/<provider>-forecast.jsonl`.
///
/// The directory is created on first write. Writes are serialized so lines from
/// different saves never interleave.
pub struct JsonLinesStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Uses the platform data directory, e.g. `~/.local/share/weather_collector` on Linux.
    pub fn in_default_dir() -> Result<Self, StoreError> {
        Ok(Self::new(get_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_for(&self, provider: Provider, current: bool) -> PathBuf {
        let kind = if current { "current" } else { "forecast" };
        self.dir.join(format!("{}-{}.jsonl", provider, kind))
    }

    async fn append(&self, record: &StoredRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let path = self.file_for(record.provider(), record.is_current());

        let _guard = self.write_lock.lock().await;
        ensure_dir_exists(&self.dir).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| StoreError::Write(path.clone(), e))?;
        file.write_all(&line)
            .await
            .map_err(|e| StoreError::Write(path.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| StoreError::Write(path.clone(), e))?;
        debug!("Appended {} bytes to {}", line.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl WeatherStore for JsonLinesStore {
    async fn save_current(
        &self,
        provider: Provider,
        location: &Location,
        payload: &WeatherPayload,
    ) -> Result<(), StoreError> {
        self.append(&StoredRecord::Current {
            provider,
            location: location.clone(),
            payload: payload.clone(),
        })
        .await
    }

    async fn save_forecast(
        &self,
        provider: Provider,
        location: &Location,
        payload: &ForecastPayload,
    ) -> Result<(), StoreError> {
        self.append(&StoredRecord::Forecast {
            provider,
            location: location.clone(),
            payload: payload.clone(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::LatLon;
    use serde_json::json;

    fn location() -> Location {
        Location::builder()
            .coordinates(LatLon(59.33, 18.07))
            .name("Stockholm")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_appends_lines_per_provider_and_kind() -> Result<(), StoreError> {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonLinesStore::new(tmp.path().join("nested"));

        for temp in [1.5, 2.0] {
            store
                .save_current(
                    Provider::OpenMeteo,
                    &location(),
                    &WeatherPayload::new(Provider::OpenMeteo, json!({ "temperature_2m": temp })),
                )
                .await?;
        }
        store
            .save_forecast(
                Provider::OpenMeteo,
                &location(),
                &ForecastPayload::new(Provider::OpenMeteo, json!({ "hourly": {} })),
            )
            .await?;

        let current = std::fs::read_to_string(store.file_for(Provider::OpenMeteo, true)).unwrap();
        let lines: Vec<&str> = current.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: StoredRecord = serde_json::from_str(lines[0])?;
        assert!(first.is_current());
        assert_eq!(first.location(), &location());

        let forecast = std::fs::read_to_string(store.file_for(Provider::OpenMeteo, false)).unwrap();
        assert_eq!(forecast.lines().count(), 1);
        assert!(forecast.contains("\"kind\":\"forecast\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_in_place_of_dir_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let store = JsonLinesStore::new(tmp.path());
        let result = store
            .save_current(
                Provider::OpenMeteo,
                &location(),
                &WeatherPayload::new(Provider::OpenMeteo, json!({})),
            )
            .await;
        assert!(matches!(result, Err(StoreError::NotADirectory(_))));
    }
}
