//! Persistence of fetched payloads behind the [`WeatherStore`] trait.

pub mod error;
pub mod json_lines;

use crate::store::error::StoreError;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[async_trait]
pub trait WeatherStore: Send + Sync {
    async fn save_current(
        &self,
        provider: Provider,
        location: &Location,
        payload: &WeatherPayload,
    ) -> Result<(), StoreError>;

    async fn save_forecast(
        &self,
        provider: Provider,
        location: &Location,
        payload: &ForecastPayload,
    ) -> Result<(), StoreError>;
}

/// One persisted payload, as written by the stores in this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredRecord {
    Current {
        provider: Provider,
        location: Location,
        payload: WeatherPayload,
    },
    Forecast {
        provider: Provider,
        location: Location,
        payload: ForecastPayload,
    },
}

impl StoredRecord {
    pub fn provider(&self) -> Provider {
        match self {
            StoredRecord::Current { provider, .. } | StoredRecord::Forecast { provider, .. } => {
                *provider
            }
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            StoredRecord::Current { location, .. } | StoredRecord::Forecast { location, .. } => {
                location
            }
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, StoredRecord::Current { .. })
    }
}

/// Keeps records in memory. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything saved so far, in save order.
    pub async fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn save_current(
        &self,
        provider: Provider,
        location: &Location,
        payload: &WeatherPayload,
    ) -> Result<(), StoreError> {
        self.records.lock().await.push(StoredRecord::Current {
            provider,
            location: location.clone(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn save_forecast(
        &self,
        provider: Provider,
        location: &Location,
        payload: &ForecastPayload,
    ) -> Result<(), StoreError> {
        self.records.lock().await.push(StoredRecord::Forecast {
            provider,
            location: location.clone(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_keeps_order() {
        let store = MemoryStore::new();
        let location = Location::builder().name("Bern").build().unwrap();
        store
            .save_forecast(
                Provider::Weatherbit,
                &location,
                &ForecastPayload::new(Provider::Weatherbit, json!({"data": []})),
            )
            .await
            .unwrap();
        store
            .save_current(
                Provider::Weatherbit,
                &location,
                &WeatherPayload::new(Provider::Weatherbit, json!({"temp": 4.5})),
            )
            .await
            .unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_current());
        assert!(records[1].is_current());
        assert_eq!(records[1].provider(), Provider::Weatherbit);
        assert_eq!(records[1].location().name(), Some("Bern"));
    }
}
