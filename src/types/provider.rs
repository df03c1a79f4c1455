//! Defines the [`Provider`] enum, naming every weather data source the collector
//! knows about, including the ones that have since shut down.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weather data source.
///
/// `None` is the sentinel for "unset or unsupported". [`Provider::Apixu`] and
/// [`Provider::DarkSky`] are retired: they still parse from configuration so that
/// a task set referencing them can be rejected with a precise error, but they have
/// no client and no quota.
///
/// # Examples
///
/// ```
/// use weather_collector::Provider;
///
/// let provider: Provider = "owm".parse().unwrap();
/// assert_eq!(provider, Provider::OpenWeatherMap);
/// assert_eq!(provider.to_string(), "openweathermap");
/// assert!("darksky".parse::<Provider>().unwrap().is_retired());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    /// No provider selected.
    #[serde(rename = "none")]
    None,
    /// OpenWeatherMap, <https://openweathermap.org/>.
    #[serde(rename = "openweathermap", alias = "owm")]
    OpenWeatherMap,
    /// Weatherbit, <https://www.weatherbit.io/>.
    #[serde(rename = "weatherbit")]
    Weatherbit,
    /// Weatherstack, <https://weatherstack.com/>.
    #[serde(rename = "weatherstack")]
    Weatherstack,
    /// Open-Meteo, <https://open-meteo.com/>. Free for non-commercial use, no key.
    #[serde(rename = "openmeteo", alias = "open-meteo")]
    OpenMeteo,
    /// Apixu. Retired, its API became Weatherstack.
    #[serde(rename = "apixu")]
    Apixu,
    /// Dark Sky. Retired after the acquisition by Apple.
    #[serde(rename = "darksky")]
    DarkSky,
}

impl Provider {
    /// Every provider that can still be queried.
    pub const ACTIVE: [Provider; 4] = [
        Provider::OpenWeatherMap,
        Provider::Weatherbit,
        Provider::Weatherstack,
        Provider::OpenMeteo,
    ];

    /// Returns `true` for providers whose service has been shut down.
    pub fn is_retired(&self) -> bool {
        matches!(self, Provider::Apixu | Provider::DarkSky)
    }

    /// Returns `true` for providers the collector can actually query.
    pub fn is_active(&self) -> bool {
        !self.is_retired() && *self != Provider::None
    }

    pub(crate) fn slug(&self) -> &'static str {
        match self {
            Provider::None => "none",
            Provider::OpenWeatherMap => "openweathermap",
            Provider::Weatherbit => "weatherbit",
            Provider::Weatherstack => "weatherstack",
            Provider::OpenMeteo => "openmeteo",
            Provider::Apixu => "apixu",
            Provider::DarkSky => "darksky",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Error returned when a provider name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weather data provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owm" | "openweathermap" => Ok(Provider::OpenWeatherMap),
            "weatherbit" => Ok(Provider::Weatherbit),
            "weatherstack" => Ok(Provider::Weatherstack),
            "openmeteo" | "open-meteo" => Ok(Provider::OpenMeteo),
            "apixu" => Ok(Provider::Apixu),
            "darksky" | "dark-sky" => Ok(Provider::DarkSky),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("OWM".parse::<Provider>(), Ok(Provider::OpenWeatherMap));
        assert_eq!(" open-meteo ".parse::<Provider>(), Ok(Provider::OpenMeteo));
        assert_eq!("Weatherstack".parse::<Provider>(), Ok(Provider::Weatherstack));
        assert_eq!(
            "accuweather".parse::<Provider>(),
            Err(UnknownProvider("accuweather".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for provider in Provider::ACTIVE {
            assert_eq!(provider.to_string().parse::<Provider>(), Ok(provider));
        }
    }

    #[test]
    fn test_retired_providers_are_not_active() {
        assert!(Provider::Apixu.is_retired());
        assert!(Provider::DarkSky.is_retired());
        assert!(!Provider::None.is_active());
        assert!(Provider::ACTIVE.iter().all(Provider::is_active));
    }

    #[test]
    fn test_deserialize_alias() {
        let provider: Provider = serde_json::from_str("\"owm\"").unwrap();
        assert_eq!(provider, Provider::OpenWeatherMap);
    }
}
