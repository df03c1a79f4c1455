//! Published request quotas of every supported provider and tier.
//!
//! Within a family, a more generous tier raises the request count and keeps the
//! window, so quotas of different tiers compare directly.

use crate::limits::limit::Limit;
use crate::types::provider::Provider;
use crate::types::tier::{OpenMeteoTier, OwmTier, Tiers, WeatherbitTier, WeatherstackTier};

/// OpenWeatherMap counts calls per minute.
pub fn owm_limit(tier: OwmTier) -> Limit {
    match tier {
        OwmTier::None => Limit::NONE,
        OwmTier::Free => Limit::per_minute(60),
        OwmTier::Startup => Limit::per_minute(600),
        OwmTier::Developer => Limit::per_minute(3_000),
        OwmTier::Professional => Limit::per_minute(30_000),
        OwmTier::Enterprise => Limit::per_minute(200_000),
    }
}

/// Weatherbit counts calls per day.
pub fn weatherbit_limit(tier: WeatherbitTier) -> Limit {
    match tier {
        WeatherbitTier::None => Limit::NONE,
        WeatherbitTier::Free => Limit::per_day(50),
        WeatherbitTier::Standard => Limit::per_day(25_000),
        WeatherbitTier::Plus => Limit::per_day(150_000),
        WeatherbitTier::Business => Limit::per_day(1_000_000),
    }
}

/// Weatherstack counts calls per month.
pub fn weatherstack_limit(tier: WeatherstackTier) -> Limit {
    match tier {
        WeatherstackTier::None => Limit::NONE,
        WeatherstackTier::Free => Limit::per_month(100),
        WeatherstackTier::Standard => Limit::per_month(50_000),
        WeatherstackTier::Professional => Limit::per_month(300_000),
        WeatherstackTier::Business => Limit::per_month(1_000_000),
    }
}

/// Open-Meteo has no hard per-key limit for its free API, only a fair-use
/// guideline, so a self-imposed ceiling well below it is used instead.
pub fn open_meteo_limit(tier: OpenMeteoTier) -> Limit {
    match tier {
        OpenMeteoTier::None => Limit::NONE,
        OpenMeteoTier::Free => Limit::per_day(5_000),
    }
}

/// Returns the request quota for `provider` under the tier configured for its family.
///
/// Total and side-effect free: `Provider::None`, retired providers and every
/// family's `None` tier all map to [`Limit::NONE`].
///
/// # Examples
///
/// ```
/// use weather_collector::{for_limit, Limit, OwmTier, Provider, Tiers};
///
/// let tiers = Tiers::builder().owm(OwmTier::Free).build();
/// assert_eq!(for_limit(Provider::OpenWeatherMap, &tiers), Limit::per_minute(60));
/// assert_eq!(for_limit(Provider::Weatherbit, &tiers), Limit::NONE);
/// assert_eq!(for_limit(Provider::None, &tiers), Limit::NONE);
/// ```
pub fn for_limit(provider: Provider, tiers: &Tiers) -> Limit {
    match provider {
        Provider::OpenWeatherMap => owm_limit(tiers.owm),
        Provider::Weatherbit => weatherbit_limit(tiers.weatherbit),
        Provider::Weatherstack => weatherstack_limit(tiers.weatherstack),
        Provider::OpenMeteo => open_meteo_limit(tiers.open_meteo),
        Provider::None | Provider::Apixu | Provider::DarkSky => Limit::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that paid tiers (everything after `None`) strictly increase the
    /// request count while keeping the window.
    fn assert_monotonic(limits: &[Limit]) {
        for pair in limits.windows(2) {
            assert!(
                pair[0].requests < pair[1].requests,
                "{} should allow fewer requests than {}",
                pair[0],
                pair[1]
            );
            assert_eq!(pair[0].timespan, pair[1].timespan);
        }
    }

    #[test]
    fn test_owm_tiers_monotonic() {
        let limits: Vec<_> = OwmTier::ALL[1..].iter().map(|t| owm_limit(*t)).collect();
        assert_monotonic(&limits);
    }

    #[test]
    fn test_weatherbit_tiers_monotonic() {
        let limits: Vec<_> = WeatherbitTier::ALL[1..]
            .iter()
            .map(|t| weatherbit_limit(*t))
            .collect();
        assert_monotonic(&limits);
    }

    #[test]
    fn test_weatherstack_tiers_monotonic() {
        let limits: Vec<_> = WeatherstackTier::ALL[1..]
            .iter()
            .map(|t| weatherstack_limit(*t))
            .collect();
        assert_monotonic(&limits);
    }

    #[test]
    fn test_none_tiers_have_zero_quota() {
        let tiers = Tiers::default();
        for provider in Provider::ACTIVE {
            assert_eq!(for_limit(provider, &tiers).requests, 0, "{}", provider);
        }
    }

    #[test]
    fn test_none_and_retired_providers_have_zero_quota() {
        let tiers = Tiers {
            owm: OwmTier::Enterprise,
            weatherbit: WeatherbitTier::Business,
            weatherstack: WeatherstackTier::Business,
            open_meteo: OpenMeteoTier::Free,
        };
        assert!(for_limit(Provider::None, &tiers).is_none());
        assert!(for_limit(Provider::Apixu, &tiers).is_none());
        assert!(for_limit(Provider::DarkSky, &tiers).is_none());
    }

    #[test]
    fn test_provider_reads_its_own_family() {
        let tiers = Tiers {
            owm: OwmTier::Startup,
            weatherbit: WeatherbitTier::Free,
            weatherstack: WeatherstackTier::Free,
            open_meteo: OpenMeteoTier::Free,
        };
        assert_eq!(for_limit(Provider::OpenWeatherMap, &tiers), Limit::per_minute(600));
        assert_eq!(for_limit(Provider::Weatherbit, &tiers), Limit::per_day(50));
        assert_eq!(for_limit(Provider::Weatherstack, &tiers), Limit::per_month(100));
        assert_eq!(for_limit(Provider::OpenMeteo, &tiers), Limit::per_day(5_000));
    }
}
