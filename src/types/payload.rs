//! Opaque payloads handed from provider clients to the store.
//!
//! The scheduler never looks inside these; parsing provider-specific JSON into
//! typed weather records is left to whoever reads the store.

use crate::types::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub provider: Provider,
    pub fetched_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

/// A forecast as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub provider: Provider,
    pub fetched_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

impl WeatherPayload {
    pub fn new(provider: Provider, body: serde_json::Value) -> Self {
        Self {
            provider,
            fetched_at: Utc::now(),
            body,
        }
    }
}

impl ForecastPayload {
    pub fn new(provider: Provider, body: serde_json::Value) -> Self {
        Self {
            provider,
            fetched_at: Utc::now(),
            body,
        }
    }
}
