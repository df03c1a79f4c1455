//! The runtime loop: fires every admitted task at its own interval, forever,
//! until asked to stop.
//!
//! One task executes at a time. Each iteration picks the task with the earliest
//! due time, fetches and stores its data, moves its due time forward by exactly
//! its interval, and sleeps until the next due time. Due times are advanced from
//! the previous due time, not from the clock, so execution latency never makes
//! the schedule drift.
//!
//! The next task is found by a linear scan, which is fine for the tens of tasks
//! a collector runs. A min-heap keyed by due time would give the same order for
//! larger sets.

pub mod error;

use crate::clients::ClientSet;
use crate::scheduler::error::SchedulerError;
use crate::store::WeatherStore;
use crate::types::data_kind::DataKind;
use crate::types::task::Task;
use crate::validation::admission::Admission;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

/// Shared, one-way stop flag for a [`Scheduler`].
///
/// Once stopped, it stays stopped. Requesting a stop also wakes a sleeping
/// scheduler, so it exits without waiting for the next due time. A fetch that
/// is already in flight always completes first.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    inner: Arc<StopSignal>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        if !self.inner.stopped.swap(true, Ordering::AcqRel) {
            info!("Stop requested");
        }
        self.inner.notify.notify_waiters();
        // The stored permit covers a waiter that has checked the flag but not yet registered.
        self.inner.notify.notify_one();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Resolves once a stop has been requested.
    pub async fn stopped(&self) {
        while !self.is_stopped() {
            self.inner.notify.notified().await;
        }
    }
}

/// A task together with the instant it is next due. Lives only inside a running scheduler.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    task: Task,
    interval: Duration,
    next_due_at: Instant,
}

impl ScheduledTask {
    fn new(task: Task, now: Instant) -> Self {
        // Admitted tasks always have a positive interval.
        let interval = task.interval().to_std().unwrap_or_default();
        Self {
            task,
            interval,
            next_due_at: now,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn next_due_at(&self) -> Instant {
        self.next_due_at
    }

    fn advance(&mut self) {
        self.next_due_at += self.interval;
    }
}

/// Index of the entry with the earliest due time; ties go to the first one.
/// `schedule` must not be empty.
fn next_due(schedule: &[ScheduledTask]) -> usize {
    let mut best = 0;
    for (index, entry) in schedule.iter().enumerate().skip(1) {
        if entry.next_due_at < schedule[best].next_due_at {
            best = index;
        }
    }
    best
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Task executions started.
    pub executions: u64,
    /// Failed fetch or store operations. One execution can fail more than once.
    pub failures: u64,
}

/// Runs admitted tasks until stopped.
///
/// A scheduler runs once: [`Scheduler::run`] consumes it. To run again after a
/// stop, build a new one; every task is then due immediately again.
pub struct Scheduler {
    tasks: Vec<Task>,
    clients: ClientSet,
    store: Arc<dyn WeatherStore>,
    stop: StopHandle,
}

impl Scheduler {
    /// Creates a scheduler for an admitted task set.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::MissingClient`] if a task's provider has no client in `clients`.
    pub fn new(
        admission: Admission,
        clients: ClientSet,
        store: Arc<dyn WeatherStore>,
    ) -> Result<Self, SchedulerError> {
        let tasks = admission.into_tasks();
        if let Some(task) = tasks.iter().find(|t| clients.get(t.provider()).is_none()) {
            return Err(SchedulerError::MissingClient(task.provider()));
        }
        Ok(Self {
            tasks,
            clients,
            store,
            stop: StopHandle::new(),
        })
    }

    /// A handle that can stop this scheduler from another task or thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Executes tasks as they fall due until a stop is requested.
    ///
    /// Returns immediately if there are no tasks. Fetch and store failures are
    /// logged and counted; they never end the run.
    pub async fn run(mut self) -> RunSummary {
        let mut summary = RunSummary::default();
        let now = Instant::now();
        let mut schedule: Vec<ScheduledTask> = std::mem::take(&mut self.tasks)
            .into_iter()
            .map(|task| ScheduledTask::new(task, now))
            .collect();

        if schedule.is_empty() {
            info!("No tasks to run");
            self.stop.request_stop();
            return summary;
        }
        info!("Scheduler started with {} tasks", schedule.len());

        let mut current = next_due(&schedule);
        loop {
            if self.stop.is_stopped() {
                break;
            }

            self.execute(schedule[current].task(), &mut summary).await;
            schedule[current].advance();

            current = next_due(&schedule);
            if self.stop.is_stopped() {
                break;
            }

            let due = schedule[current].next_due_at();
            debug!(
                "Next: {} in {:?}",
                schedule[current].task(),
                due.saturating_duration_since(Instant::now())
            );
            tokio::select! {
                _ = tokio::time::sleep_until(due) => {}
                _ = self.stop.stopped() => {}
            }
        }

        info!(
            "Scheduler stopped after {} executions ({} failures)",
            summary.executions, summary.failures
        );
        summary
    }

    async fn execute(&self, task: &Task, summary: &mut RunSummary) {
        summary.executions += 1;
        let provider = task.provider();
        let location = task.location();
        let Some(client) = self.clients.get(provider) else {
            error!("No client for {}, skipping {}", provider, task);
            summary.failures += 1;
            return;
        };
        debug!("Executing {}", task);

        match task.data_kind() {
            DataKind::Current => match client.current(location).await {
                Ok(payload) => {
                    if let Err(e) = self.store.save_current(provider, location, &payload).await {
                        error!("Could not store current weather for {}: {}", task, e);
                        summary.failures += 1;
                    }
                }
                Err(e) => {
                    error!("Could not fetch current weather for {}: {}", task, e);
                    summary.failures += 1;
                }
            },
            DataKind::Forecast => match client.forecast(location).await {
                Ok(payload) => {
                    if let Err(e) = self.store.save_forecast(provider, location, &payload).await {
                        error!("Could not store forecast for {}: {}", task, e);
                        summary.failures += 1;
                    }
                }
                Err(e) => {
                    error!("Could not fetch forecast for {}: {}", task, e);
                    summary.failures += 1;
                }
            },
            DataKind::CurrentAndForecast => match client.current_and_forecast(location).await {
                Ok((current, forecast)) => {
                    if let Err(e) = self.store.save_current(provider, location, &current).await {
                        error!("Could not store current weather for {}: {}", task, e);
                        summary.failures += 1;
                    }
                    if let Err(e) = self.store.save_forecast(provider, location, &forecast).await {
                        error!("Could not store forecast for {}: {}", task, e);
                        summary.failures += 1;
                    }
                }
                Err(e) => {
                    error!("Could not fetch weather and forecast for {}: {}", task, e);
                    summary.failures += 1;
                }
            },
            DataKind::None => {
                error!("Task {} has no data kind, skipping", task);
                summary.failures += 1;
            }
        }
    }
}
