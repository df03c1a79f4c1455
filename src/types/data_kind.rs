//! Defines the kind of weather data a task asks a provider for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of weather data requested by a task.
///
/// `None` means "unset or invalid" and is never a legal task configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Not set.
    None,
    /// Current weather observations.
    Current,
    /// Weather forecast.
    Forecast,
    /// Both current weather and forecast, fetched and stored independently.
    #[serde(alias = "both")]
    CurrentAndForecast,
}

impl DataKind {
    pub(crate) fn slug(&self) -> &'static str {
        match self {
            DataKind::None => "none",
            DataKind::Current => "current",
            DataKind::Forecast => "forecast",
            DataKind::CurrentAndForecast => "current_and_forecast",
        }
    }

    /// Whether executing a task of this kind fetches current weather.
    pub fn includes_current(&self) -> bool {
        matches!(self, DataKind::Current | DataKind::CurrentAndForecast)
    }

    /// Whether executing a task of this kind fetches a forecast.
    pub fn includes_forecast(&self) -> bool {
        matches!(self, DataKind::Forecast | DataKind::CurrentAndForecast)
    }
}

/// Allows formatting a `DataKind` variant using its `slug`.
///
/// # Examples
///
/// ```
/// use weather_collector::DataKind;
///
/// assert_eq!(DataKind::Current.to_string(), "current");
/// assert_eq!(format!("{}", DataKind::CurrentAndForecast), "current_and_forecast");
/// ```
impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown data kind '{0}', expected current, forecast or both")]
pub struct UnknownDataKind(pub String);

impl FromStr for DataKind {
    type Err = UnknownDataKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "weather" => Ok(DataKind::Current),
            "forecast" => Ok(DataKind::Forecast),
            "both" | "current_and_forecast" | "current+forecast" => {
                Ok(DataKind::CurrentAndForecast)
            }
            other => Err(UnknownDataKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Forecast".parse::<DataKind>(), Ok(DataKind::Forecast));
        assert_eq!("both".parse::<DataKind>(), Ok(DataKind::CurrentAndForecast));
        assert!("none".parse::<DataKind>().is_err());
    }

    #[test]
    fn test_includes() {
        assert!(DataKind::CurrentAndForecast.includes_current());
        assert!(DataKind::CurrentAndForecast.includes_forecast());
        assert!(!DataKind::Current.includes_forecast());
        assert!(!DataKind::None.includes_current());
    }
}
