//! Provider clients: one small struct per provider behind the [`WeatherApi`] trait,
//! plus the capability queries and the factory keyed on [`Provider`].

pub mod error;
mod http;
pub mod keys;
pub mod open_meteo;
pub mod open_weather_map;
pub mod weatherbit;
pub mod weatherstack;

use crate::clients::error::ApiError;
use crate::clients::keys::ApiKeys;
use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::payload::{ForecastPayload, WeatherPayload};
use crate::types::provider::Provider;
use crate::types::task::Task;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A weather data source the scheduler can query.
///
/// Implementations return the provider's response as an opaque payload; the
/// scheduler never inspects it.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    fn provider(&self) -> Provider;

    fn supports_data_kind(&self, data_kind: DataKind) -> bool;

    async fn current(&self, location: &Location) -> Result<WeatherPayload, ApiError>;

    async fn forecast(&self, location: &Location) -> Result<ForecastPayload, ApiError>;

    /// Fetches both; the default issues two requests and fails if either fails.
    async fn current_and_forecast(
        &self,
        location: &Location,
    ) -> Result<(WeatherPayload, ForecastPayload), ApiError> {
        let current = self.current(location).await?;
        let forecast = self.forecast(location).await?;
        Ok((current, forecast))
    }
}

/// Whether `provider` cannot be queried without an API key.
pub fn needs_credential(provider: Provider) -> bool {
    matches!(
        provider,
        Provider::OpenWeatherMap | Provider::Weatherbit | Provider::Weatherstack
    )
}

/// Whether the client for `provider` can fetch `data_kind`.
pub fn supports_data_kind(provider: Provider, data_kind: DataKind) -> bool {
    match provider {
        Provider::OpenWeatherMap | Provider::Weatherbit | Provider::OpenMeteo => {
            data_kind != DataKind::None
        }
        Provider::Weatherstack => data_kind == DataKind::Current,
        Provider::None | Provider::Apixu | Provider::DarkSky => false,
    }
}

/// HTTP requests one execution of a `data_kind` task sends to `provider`.
///
/// Fetching both current weather and a forecast takes two requests, except on
/// Open-Meteo, whose client gets both in one response.
pub fn requests_per_execution(provider: Provider, data_kind: DataKind) -> u64 {
    match (provider, data_kind) {
        (Provider::OpenMeteo, _) => 1,
        (_, DataKind::CurrentAndForecast) => 2,
        _ => 1,
    }
}

/// Whether the client for `provider` can address `location`.
pub fn supports_location(provider: Provider, location: &Location) -> bool {
    match provider {
        Provider::OpenWeatherMap => open_weather_map::location_params(location).is_ok(),
        Provider::Weatherbit => weatherbit::location_params(location).is_ok(),
        Provider::Weatherstack => weatherstack::location_query(location).is_ok(),
        Provider::OpenMeteo => location.coordinates().is_some(),
        Provider::None | Provider::Apixu | Provider::DarkSky => false,
    }
}

/// Creates the client for `provider`.
///
/// # Errors
///
/// Returns [`ApiError::UnsupportedProvider`] for `Provider::None`,
/// [`ApiError::RetiredProvider`] for retired providers, and
/// [`ApiError::MissingCredential`] if the provider needs a key that `keys` lacks.
pub fn create_client(
    provider: Provider,
    keys: &ApiKeys,
    http: &Client,
) -> Result<Arc<dyn WeatherApi>, ApiError> {
    debug!("Creating client for {}", provider);
    let key = || {
        keys.get(provider)
            .ok_or(ApiError::MissingCredential(provider))
    };
    match provider {
        Provider::OpenWeatherMap => Ok(Arc::new(open_weather_map::OpenWeatherMapClient::new(
            http.clone(),
            key()?,
        ))),
        Provider::Weatherbit => Ok(Arc::new(weatherbit::WeatherbitClient::new(
            http.clone(),
            key()?,
        ))),
        Provider::Weatherstack => Ok(Arc::new(weatherstack::WeatherstackClient::new(
            http.clone(),
            key()?,
        ))),
        Provider::OpenMeteo => Ok(Arc::new(open_meteo::OpenMeteoClient::new(http.clone()))),
        Provider::Apixu | Provider::DarkSky => Err(ApiError::RetiredProvider(provider)),
        Provider::None => Err(ApiError::UnsupportedProvider(provider)),
    }
}

/// The provider-to-client map handed to the scheduler.
///
/// # Examples
///
/// ```
/// use weather_collector::{ApiKeys, ClientSet, Provider};
///
/// let clients = ClientSet::from_keys(&[Provider::OpenMeteo], &ApiKeys::new())?;
/// assert!(clients.get(Provider::OpenMeteo).is_some());
/// assert!(clients.get(Provider::Weatherbit).is_none());
/// # Ok::<(), weather_collector::ApiError>(())
/// ```
#[derive(Clone, Default)]
pub struct ClientSet {
    clients: HashMap<Provider, Arc<dyn WeatherApi>>,
}

impl ClientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `client` under the provider it reports.
    pub fn with(mut self, client: Arc<dyn WeatherApi>) -> Self {
        self.insert(client);
        self
    }

    pub fn insert(&mut self, client: Arc<dyn WeatherApi>) {
        self.clients.insert(client.provider(), client);
    }

    pub fn get(&self, provider: Provider) -> Option<&Arc<dyn WeatherApi>> {
        self.clients.get(&provider)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Creates one client per distinct provider, sharing a single HTTP connection pool.
    pub fn from_keys(providers: &[Provider], keys: &ApiKeys) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::NetworkRequest("client setup".to_string(), e))?;
        let mut set = ClientSet::new();
        for provider in providers {
            if set.get(*provider).is_none() {
                set.insert(create_client(*provider, keys, &http)?);
            }
        }
        Ok(set)
    }

    /// Creates exactly the clients needed by `tasks`.
    pub fn for_tasks(tasks: &[Task], keys: &ApiKeys) -> Result<Self, ApiError> {
        let providers: Vec<Provider> = tasks.iter().map(Task::provider).collect();
        Self::from_keys(&providers, keys)
    }
}
