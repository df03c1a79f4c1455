//! Client for the Weatherstack API.
//!
//! Weatherstack answers failed requests with HTTP 200 and an error object in the
//! body, so the body is checked before it is handed on. Forecasts need a plan
//! this client does not target; only current weather is supported.

use crate::clients::error::ApiError;
use crate::clients::http::get_json;
use crate::clients::WeatherApi;
use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://api.weatherstack.com";

pub struct WeatherstackClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WeatherstackClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Weatherstack takes a single free-form `query` parameter.
pub(crate) fn location_query(location: &Location) -> Result<String, ApiError> {
    if let Some(coords) = location.coordinates() {
        return Ok(format!("{},{}", coords.latitude(), coords.longitude()));
    }
    let value = location.postcode().or(location.name()).ok_or_else(|| {
        ApiError::UnsupportedLocation {
            provider: Provider::Weatherstack,
            location: location.to_string(),
        }
    })?;
    Ok(match location.country_code() {
        Some(cc) => format!("{}, {}", value, cc),
        None => value.to_string(),
    })
}

/// Extracts the error message of a `{"success": false, "error": {...}}` body.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    if body.get("success").and_then(Value::as_bool) != Some(false) {
        return None;
    }
    let info = body
        .pointer("/error/info")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some(info.to_string())
}

#[async_trait]
impl WeatherApi for WeatherstackClient {
    fn provider(&self) -> Provider {
        Provider::Weatherstack
    }

    fn supports_data_kind(&self, data_kind: DataKind) -> bool {
        data_kind == DataKind::Current
    }

    async fn current(&self, location: &Location) -> Result<WeatherPayload, ApiError> {
        let url = format!("{}/current", self.base_url);
        let query = [
            ("access_key", self.api_key.clone()),
            ("query", location_query(location)?),
            ("units", "m".to_string()),
        ];
        let body = get_json(&self.http, &url, &query).await?;
        if let Some(message) = error_message(&body) {
            return Err(ApiError::Provider {
                provider: Provider::Weatherstack,
                url,
                message,
            });
        }
        Ok(WeatherPayload::new(Provider::Weatherstack, body))
    }

    async fn forecast(&self, _location: &Location) -> Result<ForecastPayload, ApiError> {
        Err(ApiError::UnsupportedDataKind {
            provider: Provider::Weatherstack,
            data_kind: DataKind::Forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::LatLon;
    use serde_json::json;

    #[test]
    fn test_location_query() {
        let by_coords = Location::builder()
            .coordinates(LatLon(40.71, -74.0))
            .name("New York")
            .build()
            .unwrap();
        assert_eq!(location_query(&by_coords).unwrap(), "40.71,-74");

        let by_name = Location::builder()
            .name("New York")
            .country_code("US")
            .build()
            .unwrap();
        assert_eq!(location_query(&by_name).unwrap(), "New York, US");

        let by_id = Location::builder().id(5128581).build().unwrap();
        assert!(location_query(&by_id).is_err());
    }

    #[test]
    fn test_error_body_detection() {
        let failed = json!({
            "success": false,
            "error": {"code": 104, "type": "usage_limit_reached", "info": "Your monthly usage limit has been reached."}
        });
        assert_eq!(
            error_message(&failed).as_deref(),
            Some("Your monthly usage limit has been reached.")
        );
        assert_eq!(error_message(&json!({"current": {"temperature": 13}})), None);
    }

    #[tokio::test]
    async fn test_forecast_is_unsupported() {
        let client = WeatherstackClient::new(Client::new(), "key");
        let location = Location::builder().name("Lisbon").build().unwrap();
        assert!(matches!(
            client.forecast(&location).await,
            Err(ApiError::UnsupportedDataKind { .. })
        ));
        assert!(!client.supports_data_kind(DataKind::CurrentAndForecast));
    }
}
