//! Client for the Weatherbit 2.0 API.

use crate::clients::error::ApiError;
use crate::clients::http::get_json;
use crate::clients::WeatherApi;
use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;

const BASE_URL: &str = "https://api.weatherbit.io/v2.0";

pub struct WeatherbitClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WeatherbitClient {
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

    fn query(&self, location: &Location) -> Result<Vec<(&'static str, String)>, ApiError> {
        let mut query = location_params(location)?;
        query.push(("units", "M".to_string()));
        query.push(("key", self.api_key.clone()));
        Ok(query)
    }
}

pub(crate) fn location_params(location: &Location) -> Result<Vec<(&'static str, String)>, ApiError> {
    if let Some(id) = location.id() {
        return Ok(vec![("city_id", id.to_string())]);
    }
    if let Some(coords) = location.coordinates() {
        return Ok(vec![
            ("lat", coords.latitude().to_string()),
            ("lon", coords.longitude().to_string()),
        ]);
    }
    let mut query = if let Some(postcode) = location.postcode() {
        vec![("postal_code", postcode.to_string())]
    } else if let Some(name) = location.name() {
        vec![("city", name.to_string())]
    } else {
        return Err(ApiError::UnsupportedLocation {
            provider: Provider::Weatherbit,
            location: location.to_string(),
        });
    };
    if let Some(cc) = location.country_code() {
        query.push(("country", cc.to_string()));
    }
    Ok(query)
}

#[async_trait]
impl WeatherApi for WeatherbitClient {
    fn provider(&self) -> Provider {
        Provider::Weatherbit
    }

    fn supports_data_kind(&self, data_kind: DataKind) -> bool {
        data_kind != DataKind::None
    }

    async fn current(&self, location: &Location) -> Result<WeatherPayload, ApiError> {
        let url = format!("{}/current", self.base_url);
        let body = get_json(&self.http, &url, &self.query(location)?).await?;
        Ok(WeatherPayload::new(Provider::Weatherbit, body))
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastPayload, ApiError> {
        let url = format!("{}/forecast/daily", self.base_url);
        let body = get_json(&self.http, &url, &self.query(location)?).await?;
        Ok(ForecastPayload::new(Provider::Weatherbit, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postcode_with_country() {
        let location = Location::builder()
            .postcode("10115")
            .country_code("de")
            .build()
            .unwrap();
        assert_eq!(
            location_params(&location).unwrap(),
            vec![
                ("postal_code", "10115".to_string()),
                ("country", "DE".to_string())
            ]
        );
    }

    #[test]
    fn test_city_id() {
        let location = Location::builder().id(2867714).build().unwrap();
        assert_eq!(
            location_params(&location).unwrap(),
            vec![("city_id", "2867714".to_string())]
        );
    }

    #[test]
    fn test_city_without_country() {
        let location = Location::builder().name("Raleigh").build().unwrap();
        assert_eq!(
            location_params(&location).unwrap(),
            vec![("city", "Raleigh".to_string())]
        );
    }
}
