//! Admission control: decides, before any request is sent, whether a task set
//! can run forever without exceeding any provider's quota.
//!
//! The estimate is pessimistic. Each task is charged `ceil(window / interval)`
//! requests per quota window, so an interval that does not divide the window
//! evenly is rounded towards more requests, never fewer.

use crate::clients::keys::ApiKeys;
use crate::clients::{
    needs_credential, requests_per_execution, supports_data_kind, supports_location,
};
use crate::limits::catalog::for_limit;
use crate::limits::limit::Limit;
use crate::types::provider::Provider;
use crate::types::task::Task;
use crate::types::tier::Tiers;
use crate::validation::duplicates::find_duplicate;
use crate::validation::error::ValidationError;
use bon::Builder;
use chrono::TimeDelta;
use log::{info, warn};
use std::collections::BTreeMap;

/// Requests a task set would consume per quota window of one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderUsage {
    pub provider: Provider,
    pub limit: Limit,
    /// Pessimistic request count per `limit.timespan`.
    pub requests: u64,
}

impl ProviderUsage {
    pub fn is_within_limit(&self) -> bool {
        self.requests <= self.limit.requests
    }

    /// Share of the quota used, in percent. Infinite for a zero quota with demand.
    pub fn utilization_percent(&self) -> f64 {
        if self.limit.requests == 0 {
            return if self.requests == 0 { 0.0 } else { f64::INFINITY };
        }
        self.requests as f64 * 100.0 / self.limit.requests as f64
    }
}

/// Sums the pessimistic request estimate per provider, ordered by provider.
///
/// Each task is charged per firing as many requests as its provider needs for
/// its data kind, see [`requests_per_execution`].
///
/// Returns `None` if any task has a non-positive interval.
pub fn estimate_usage(tasks: &[Task], tiers: &Tiers) -> Option<Vec<ProviderUsage>> {
    let mut usage: BTreeMap<Provider, ProviderUsage> = BTreeMap::new();
    for task in tasks {
        let provider = task.provider();
        let limit = for_limit(provider, tiers);
        let firings = limit.requests_for_interval(task.interval())?;
        let requests = firings.saturating_mul(requests_per_execution(provider, task.data_kind()));
        let entry = usage.entry(provider).or_insert(ProviderUsage {
            provider,
            limit,
            requests: 0,
        });
        entry.requests = entry.requests.saturating_add(requests);
    }
    Some(usage.into_values().collect())
}

fn report_usage(usage: &[ProviderUsage]) {
    for entry in usage {
        info!(
            "{}: {} of {} requests per window ({:.1}%){}",
            entry.provider,
            entry.requests,
            entry.limit,
            entry.utilization_percent(),
            if entry.is_within_limit() {
                ""
            } else {
                " - limit exceeded"
            }
        );
    }
}

/// Returns `true` if running `tasks` forever stays within every provider's quota
/// for the configured `tiers`.
///
/// Any task with a non-positive interval fails the check outright. Unless
/// `silent`, a per-provider utilization report is logged first.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use weather_collector::{within_limits, DataKind, Location, OwmTier, Provider, Task, Tiers};
///
/// let tiers = Tiers::builder().owm(OwmTier::Free).build();
/// let location = Location::builder().name("Rome").build()?;
/// let task = Task::new(location, Provider::OpenWeatherMap, DataKind::Current, TimeDelta::seconds(60));
///
/// assert!(within_limits(&vec![task.clone(); 60], &tiers, true));
/// assert!(!within_limits(&vec![task; 61], &tiers, true));
/// # Ok::<(), weather_collector::LocationError>(())
/// ```
pub fn within_limits(tasks: &[Task], tiers: &Tiers, silent: bool) -> bool {
    if let Some(index) = tasks.iter().position(|t| t.interval() <= TimeDelta::zero()) {
        if !silent {
            warn!("{}", ValidationError::NonPositiveInterval { index });
        }
        return false;
    }
    let Some(usage) = estimate_usage(tasks, tiers) else {
        return false;
    };
    if !silent {
        report_usage(&usage);
    }
    usage.iter().all(ProviderUsage::is_within_limit)
}

/// How [`build_and_validate`] treats the limit check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct AdmissionOptions {
    /// Suppress the utilization report and the duplicate/limit warnings.
    #[builder(default)]
    pub silent: bool,
    /// Turn an exceeded limit from a warning into [`ValidationError::LimitExceeded`].
    #[builder(default)]
    pub abort_on_exceeded_limits: bool,
    /// Skip the limit check entirely, e.g. for a custom plan the catalog does not know.
    #[builder(default)]
    pub ignore_limits: bool,
}

/// A task set that passed validation. The only way to obtain one is
/// [`build_and_validate`], which is what lets the scheduler trust its tasks.
#[derive(Debug, Clone)]
pub struct Admission {
    tasks: Vec<Task>,
    usage: Vec<ProviderUsage>,
    within_limits: bool,
    limits_checked: bool,
}

impl Admission {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn usage(&self) -> &[ProviderUsage] {
        &self.usage
    }

    /// `false` if the limit check failed but was only advisory.
    pub fn within_limits(&self) -> bool {
        self.within_limits
    }

    /// `false` if the limit check was skipped with `ignore_limits`.
    pub fn limits_checked(&self) -> bool {
        self.limits_checked
    }

    pub(crate) fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

fn check_task(index: usize, task: &Task) -> Result<(), ValidationError> {
    if !task.is_complete() {
        return Err(ValidationError::IncompleteTask {
            index,
            task: task.to_string(),
        });
    }
    let provider = task.provider();
    if provider.is_retired() {
        return Err(ValidationError::RetiredProvider { index, provider });
    }
    if !provider.is_active() {
        return Err(ValidationError::UnsupportedProvider { index, provider });
    }
    if !supports_data_kind(provider, task.data_kind()) {
        return Err(ValidationError::UnsupportedDataKind {
            index,
            provider,
            data_kind: task.data_kind(),
        });
    }
    if !supports_location(provider, task.location()) {
        return Err(ValidationError::UnsupportedLocation {
            index,
            provider,
            location: task.location().to_string(),
        });
    }
    Ok(())
}

/// Validates a task set and decides whether it may be scheduled.
///
/// Checks, in order: every task is complete and uses an active provider that
/// supports its data kind and location; every provider that needs a key has one;
/// no two tasks collect the same data; and the set stays within the quotas of
/// the configured `tiers`. The limit check is advisory unless
/// `abort_on_exceeded_limits` is set, and skipped if `ignore_limits` is set.
///
/// Pure apart from logging: validating the same input twice gives the same result.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn build_and_validate(
    tasks: Vec<Task>,
    tiers: &Tiers,
    keys: &ApiKeys,
    options: AdmissionOptions,
) -> Result<Admission, ValidationError> {
    for (index, task) in tasks.iter().enumerate() {
        check_task(index, task)?;
    }

    let mut providers: Vec<Provider> = tasks.iter().map(Task::provider).collect();
    providers.sort();
    providers.dedup();
    if let Some(provider) = providers
        .iter()
        .find(|p| needs_credential(**p) && !keys.contains(**p))
    {
        return Err(ValidationError::MissingCredential(*provider));
    }

    if let Some((first, second)) = find_duplicate(&tasks) {
        let task = &tasks[first];
        return Err(ValidationError::DuplicateTask {
            first,
            second,
            provider: task.provider(),
            data_kind: task.data_kind(),
            location: task.location().to_string(),
        });
    }

    let Some(usage) = estimate_usage(&tasks, tiers) else {
        let index = tasks
            .iter()
            .position(|t| t.interval() <= TimeDelta::zero())
            .unwrap_or_default();
        return Err(ValidationError::NonPositiveInterval { index });
    };

    if options.ignore_limits {
        if !options.silent {
            warn!("Request limits are ignored, quotas are not checked");
        }
        return Ok(Admission {
            tasks,
            usage,
            within_limits: true,
            limits_checked: false,
        });
    }

    if !options.silent {
        report_usage(&usage);
    }
    let exceeded = usage.iter().find(|u| !u.is_within_limit());
    if let Some(entry) = exceeded {
        let error = ValidationError::LimitExceeded {
            provider: entry.provider,
            estimated: entry.requests,
            limit: entry.limit,
        };
        if options.abort_on_exceeded_limits {
            return Err(error);
        }
        if !options.silent {
            warn!("{}", error);
        }
    }

    Ok(Admission {
        tasks,
        within_limits: exceeded.is_none(),
        usage,
        limits_checked: true,
    })
}
