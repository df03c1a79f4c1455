//! Subscription tiers, one closed enumeration per provider family.
//!
//! Tiers are declared in ascending order of generosity; the limit catalog relies
//! on that order and its tests check it.

use serde::{Deserialize, Serialize};

/// OpenWeatherMap subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwmTier {
    #[default]
    None,
    Free,
    Startup,
    Developer,
    Professional,
    Enterprise,
}

/// Weatherbit subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherbitTier {
    #[default]
    None,
    Free,
    Standard,
    Plus,
    Business,
}

/// Weatherstack subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherstackTier {
    #[default]
    None,
    Free,
    Standard,
    Professional,
    Business,
}

/// Open-Meteo usage tier. Only the free, key-less API is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMeteoTier {
    #[default]
    None,
    Free,
}

impl OwmTier {
    pub const ALL: [OwmTier; 6] = [
        OwmTier::None,
        OwmTier::Free,
        OwmTier::Startup,
        OwmTier::Developer,
        OwmTier::Professional,
        OwmTier::Enterprise,
    ];
}

impl WeatherbitTier {
    pub const ALL: [WeatherbitTier; 5] = [
        WeatherbitTier::None,
        WeatherbitTier::Free,
        WeatherbitTier::Standard,
        WeatherbitTier::Plus,
        WeatherbitTier::Business,
    ];
}

impl WeatherstackTier {
    pub const ALL: [WeatherstackTier; 5] = [
        WeatherstackTier::None,
        WeatherstackTier::Free,
        WeatherstackTier::Standard,
        WeatherstackTier::Professional,
        WeatherstackTier::Business,
    ];
}

impl OpenMeteoTier {
    pub const ALL: [OpenMeteoTier; 2] = [OpenMeteoTier::None, OpenMeteoTier::Free];
}

/// The tier chosen for each provider family.
///
/// Every family defaults to its `None` tier, which the limit catalog maps to a
/// zero quota. A task set that uses a provider therefore needs that provider's
/// tier configured before it can be admitted.
///
/// # Examples
///
/// ```
/// use weather_collector::{OwmTier, Tiers};
///
/// let tiers = Tiers::builder().owm(OwmTier::Free).build();
/// assert_eq!(tiers.owm, OwmTier::Free);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct Tiers {
    #[builder(default)]
    #[serde(alias = "openweathermap")]
    pub owm: OwmTier,
    #[builder(default)]
    pub weatherbit: WeatherbitTier,
    #[builder(default)]
    pub weatherstack: WeatherstackTier,
    #[builder(default)]
    #[serde(alias = "openmeteo")]
    pub open_meteo: OpenMeteoTier,
}
