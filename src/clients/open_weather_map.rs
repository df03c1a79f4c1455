//! Client for the OpenWeatherMap 2.5 API.

use crate::clients::error::ApiError;
use crate::clients::http::get_json;
use crate::clients::WeatherApi;
use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn query(&self, location: &Location) -> Result<Vec<(&'static str, String)>, ApiError> {
        let mut query = location_params(location)?;
        query.push(("units", "metric".to_string()));
        query.push(("appid", self.api_key.clone()));
        Ok(query)
    }
}

/// OpenWeatherMap accepts, in order of precision: city id, coordinates,
/// postcode with country, city name with optional country.
pub(crate) fn location_params(location: &Location) -> Result<Vec<(&'static str, String)>, ApiError> {
    if let Some(id) = location.id() {
        return Ok(vec![("id", id.to_string())]);
    }
    if let Some(coords) = location.coordinates() {
        return Ok(vec![
            ("lat", coords.latitude().to_string()),
            ("lon", coords.longitude().to_string()),
        ]);
    }
    let with_country = |value: &str| match location.country_code() {
        Some(cc) => format!("{},{}", value, cc.to_ascii_lowercase()),
        None => value.to_string(),
    };
    if let Some(postcode) = location.postcode() {
        return Ok(vec![("zip", with_country(postcode))]);
    }
    if let Some(name) = location.name() {
        return Ok(vec![("q", with_country(name))]);
    }
    Err(ApiError::UnsupportedLocation {
        provider: Provider::OpenWeatherMap,
        location: location.to_string(),
    })
}

#[async_trait]
impl WeatherApi for OpenWeatherMapClient {
    fn provider(&self) -> Provider {
        Provider::OpenWeatherMap
    }

    fn supports_data_kind(&self, data_kind: DataKind) -> bool {
        data_kind != DataKind::None
    }

    async fn current(&self, location: &Location) -> Result<WeatherPayload, ApiError> {
        let url = format!("{}/weather", self.base_url);
        let body = get_json(&self.http, &url, &self.query(location)?).await?;
        Ok(WeatherPayload::new(Provider::OpenWeatherMap, body))
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastPayload, ApiError> {
        let url = format!("{}/forecast", self.base_url);
        let body = get_json(&self.http, &url, &self.query(location)?).await?;
        Ok(ForecastPayload::new(Provider::OpenWeatherMap, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::LatLon;

    #[test]
    fn test_id_takes_precedence() {
        let location = Location::builder()
            .id(2950159)
            .coordinates(LatLon(52.52, 13.41))
            .name("Berlin")
            .build()
            .unwrap();
        assert_eq!(
            location_params(&location).unwrap(),
            vec![("id", "2950159".to_string())]
        );
    }

    #[test]
    fn test_coordinates() {
        let location = Location::builder()
            .coordinates(LatLon(52.52, 13.41))
            .build()
            .unwrap();
        assert_eq!(
            location_params(&location).unwrap(),
            vec![("lat", "52.52".to_string()), ("lon", "13.41".to_string())]
        );
    }

    #[test]
    fn test_name_and_postcode_with_country() {
        let by_name = Location::builder()
            .name("Paris")
            .country_code("FR")
            .build()
            .unwrap();
        assert_eq!(
            location_params(&by_name).unwrap(),
            vec![("q", "Paris,fr".to_string())]
        );

        let by_postcode = Location::builder()
            .postcode("01067")
            .country_code("DE")
            .build()
            .unwrap();
        assert_eq!(
            location_params(&by_postcode).unwrap(),
            vec![("zip", "01067,de".to_string())]
        );
    }

    #[test]
    fn test_key_is_appended() {
        let client = OpenWeatherMapClient::new(Client::new(), "abc");
        let location = Location::builder().name("Oslo").build().unwrap();
        let query = client.query(&location).unwrap();
        assert!(query.contains(&("appid", "abc".to_string())));
        assert!(query.contains(&("units", "metric".to_string())));
    }

    #[test]
    fn test_empty_location_is_rejected() {
        assert!(matches!(
            location_params(&Location::default()),
            Err(ApiError::UnsupportedLocation { .. })
        ));
    }
}
