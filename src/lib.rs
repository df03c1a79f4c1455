mod clients;
mod collector;
mod config;
mod error;
mod limits;
mod scheduler;
mod store;
mod types;
mod utils;
mod validation;

pub use collector::Collector;
pub use config::{CollectorConfig, ConfigError};
pub use error::CollectorError;

pub use clients::error::ApiError;
pub use clients::keys::ApiKeys;
pub use clients::open_meteo::OpenMeteoClient;
pub use clients::open_weather_map::OpenWeatherMapClient;
pub use clients::weatherbit::WeatherbitClient;
pub use clients::weatherstack::WeatherstackClient;
pub use clients::{
    create_client, needs_credential, requests_per_execution, supports_data_kind, supports_location,
    ClientSet, WeatherApi,
};

pub use limits::catalog::for_limit;
pub use limits::limit::Limit;

pub use scheduler::error::SchedulerError;
pub use scheduler::{RunSummary, ScheduledTask, Scheduler, StopHandle};

pub use store::error::StoreError;
pub use store::json_lines::JsonLinesStore;
pub use store::{MemoryStore, StoredRecord, WeatherStore};

pub use types::data_kind::{DataKind, UnknownDataKind};
pub use types::location::{LatLon, Location, LocationError, COORDINATE_TOLERANCE};
pub use types::payload::{ForecastPayload, WeatherPayload};
pub use types::provider::{Provider, UnknownProvider};
pub use types::task::Task;
pub use types::tier::{OpenMeteoTier, OwmTier, Tiers, WeatherbitTier, WeatherstackTier};

pub use validation::admission::{
    build_and_validate, estimate_usage, within_limits, Admission, AdmissionOptions, ProviderUsage,
};
pub use validation::duplicates::{find_duplicate, has_duplicates};
pub use validation::error::ValidationError;
