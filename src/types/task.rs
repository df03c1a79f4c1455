//! The [`Task`] value: one recurring collection request.

use crate::types::data_kind::DataKind;
use crate::types::location::Location;
use crate::types::provider::Provider;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recurring collection request: fetch `data_kind` for `location` from
/// `provider` every `interval`.
///
/// The interval is clamped to be non-negative at construction. A task is only
/// allowed into the schedule when it is [complete](Task::is_complete).
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use weather_collector::{DataKind, LatLon, Location, Provider, Task};
///
/// let location = Location::builder().coordinates(LatLon(48.85, 2.35)).build()?;
/// let task = Task::new(location, Provider::OpenWeatherMap, DataKind::Current, TimeDelta::minutes(15));
/// assert!(task.is_complete());
///
/// let clamped = Task::new(Location::default(), Provider::None, DataKind::None, TimeDelta::seconds(-5));
/// assert_eq!(clamped.interval(), TimeDelta::zero());
/// assert!(!clamped.is_complete());
/// # Ok::<(), weather_collector::LocationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    location: Location,
    provider: Provider,
    data_kind: DataKind,
    interval: TimeDelta,
}

impl Task {
    pub fn new(
        location: Location,
        provider: Provider,
        data_kind: DataKind,
        interval: TimeDelta,
    ) -> Self {
        Self {
            location,
            provider,
            data_kind,
            interval: interval.max(TimeDelta::zero()),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// A task is complete iff its location is non-empty, provider and data kind
    /// are set, and its interval is positive.
    pub fn is_complete(&self) -> bool {
        !self.location.is_empty()
            && self.provider != Provider::None
            && self.data_kind != DataKind::None
            && self.interval > TimeDelta::zero()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for {} from {} every {}s",
            self.data_kind,
            self.location,
            self.provider,
            self.interval.num_seconds()
        )
    }
}

impl Serialize for Task {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawTask {
            location: self.location.clone(),
            provider: self.provider,
            data: self.data_kind,
            interval: self.interval.num_seconds(),
        }
        .serialize(serializer)
    }
}

/// On-disk shape of a task: the interval is given in whole seconds.
#[derive(Serialize, Deserialize)]
struct RawTask {
    location: Location,
    #[serde(default = "default_provider")]
    provider: Provider,
    #[serde(default = "default_data_kind", alias = "data_kind")]
    data: DataKind,
    #[serde(default, alias = "interval_secs")]
    interval: i64,
}

fn default_provider() -> Provider {
    Provider::None
}

fn default_data_kind() -> DataKind {
    DataKind::None
}

fn interval_from_secs(secs: i64) -> TimeDelta {
    TimeDelta::try_seconds(secs).unwrap_or(if secs < 0 {
        TimeDelta::zero()
    } else {
        TimeDelta::MAX
    })
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        Task::new(
            raw.location,
            raw.provider,
            raw.data,
            interval_from_secs(raw.interval),
        )
    }
}
