//! Client for the Open-Meteo forecast API. No key needed; coordinates only.

use crate::clients::error::ApiError;
use crate::clients::http::get_json;
use crate::clients::WeatherApi;
use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;

const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const CURRENT_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,pressure_msl,cloud_cover,wind_speed_10m,wind_direction_10m,precipitation,weather_code";
const HOURLY_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,pressure_msl,cloud_cover,wind_speed_10m,precipitation,weather_code";

pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request(
        &self,
        location: &Location,
        data_kind: DataKind,
    ) -> Result<serde_json::Value, ApiError> {
        let query = query_params(location, data_kind)?;
        get_json(&self.http, &self.base_url, &query).await
    }
}

pub(crate) fn query_params(
    location: &Location,
    data_kind: DataKind,
) -> Result<Vec<(&'static str, String)>, ApiError> {
    let coords = location
        .coordinates()
        .ok_or_else(|| ApiError::UnsupportedLocation {
            provider: Provider::OpenMeteo,
            location: location.to_string(),
        })?;
    let mut query = vec![
        ("latitude", coords.latitude().to_string()),
        ("longitude", coords.longitude().to_string()),
        ("timezone", "UTC".to_string()),
    ];
    if data_kind.includes_current() {
        query.push(("current", CURRENT_VARIABLES.to_string()));
    }
    if data_kind.includes_forecast() {
        query.push(("hourly", HOURLY_VARIABLES.to_string()));
    }
    Ok(query)
}

#[async_trait]
impl WeatherApi for OpenMeteoClient {
    fn provider(&self) -> Provider {
        Provider::OpenMeteo
    }

    fn supports_data_kind(&self, data_kind: DataKind) -> bool {
        data_kind != DataKind::None
    }

    async fn current(&self, location: &Location) -> Result<WeatherPayload, ApiError> {
        let body = self.request(location, DataKind::Current).await?;
        Ok(WeatherPayload::new(Provider::OpenMeteo, body))
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastPayload, ApiError> {
        let body = self.request(location, DataKind::Forecast).await?;
        Ok(ForecastPayload::new(Provider::OpenMeteo, body))
    }

    /// Open-Meteo returns current values and the hourly forecast in one response.
    async fn current_and_forecast(
        &self,
        location: &Location,
    ) -> Result<(WeatherPayload, ForecastPayload), ApiError> {
        let body = self.request(location, DataKind::CurrentAndForecast).await?;
        Ok((
            WeatherPayload::new(Provider::OpenMeteo, body.clone()),
            ForecastPayload::new(Provider::OpenMeteo, body),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::LatLon;

    #[test]
    fn test_requires_coordinates() {
        let location = Location::builder().name("Vienna").build().unwrap();
        assert!(matches!(
            query_params(&location, DataKind::Current),
            Err(ApiError::UnsupportedLocation { .. })
        ));
    }

    #[test]
    fn test_variables_follow_data_kind() {
        let location = Location::builder()
            .coordinates(LatLon(48.21, 16.37))
            .build()
            .unwrap();
        let names = |kind| -> Vec<&'static str> {
            query_params(&location, kind)
                .unwrap()
                .into_iter()
                .map(|(name, _)| name)
                .collect()
        };
        assert_eq!(names(DataKind::Current), ["latitude", "longitude", "timezone", "current"]);
        assert_eq!(names(DataKind::Forecast), ["latitude", "longitude", "timezone", "hourly"]);
        assert_eq!(
            names(DataKind::CurrentAndForecast),
            ["latitude", "longitude", "timezone", "current", "hourly"]
        );
    }
}
