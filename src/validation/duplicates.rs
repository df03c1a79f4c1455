//! Detection of tasks that claim the same provider, data kind and location.
//!
//! The interval is not part of the key: a provider/location/data kind triple
//! may only be collected at one interval.

use crate::types::task::Task;
use log::warn;

fn same_target(a: &Task, b: &Task) -> bool {
    a.provider() == b.provider() && a.data_kind() == b.data_kind() && a.location() == b.location()
}

/// Returns the indices of the first pair of conflicting tasks, if any.
///
/// Pairwise scan; task sets are tens of entries at most.
pub fn find_duplicate(tasks: &[Task]) -> Option<(usize, usize)> {
    for (i, first) in tasks.iter().enumerate() {
        for (offset, second) in tasks[i + 1..].iter().enumerate() {
            if same_target(first, second) {
                return Some((i, i + 1 + offset));
            }
        }
    }
    None
}

/// Returns `true` if two tasks share provider, data kind and location.
///
/// Unless `silent`, the conflicting triple is logged as a warning.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use weather_collector::{has_duplicates, DataKind, Location, Provider, Task};
///
/// let location = Location::builder().name("Lyon").country_code("FR").build()?;
/// let hourly = Task::new(location.clone(), Provider::Weatherbit, DataKind::Current, TimeDelta::hours(1));
/// let daily = Task::new(location, Provider::Weatherbit, DataKind::Current, TimeDelta::days(1));
///
/// assert!(!has_duplicates(&[], true));
/// assert!(has_duplicates(&[hourly, daily], true));
/// # Ok::<(), weather_collector::LocationError>(())
/// ```
pub fn has_duplicates(tasks: &[Task], silent: bool) -> bool {
    match find_duplicate(tasks) {
        Some((first, second)) => {
            if !silent {
                let task = &tasks[first];
                warn!(
                    "Tasks #{} and #{} both collect {} data for '{}' from {}",
                    first,
                    second,
                    task.data_kind(),
                    task.location(),
                    task.provider()
                );
            }
            true
        }
        None => false,
    }
}
