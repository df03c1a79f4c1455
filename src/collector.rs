//! The main entry point: turns a [`CollectorConfig`] into a running scheduler.

use crate::clients::ClientSet;
use crate::config::CollectorConfig;
use crate::error::CollectorError;
use crate::scheduler::{RunSummary, Scheduler, StopHandle};
use crate::store::json_lines::JsonLinesStore;
use crate::store::WeatherStore;
use crate::validation::admission::{build_and_validate, Admission};
use log::info;
use std::sync::Arc;

/// A validated, ready-to-run collector.
///
/// Construction does all configuration checks up front: tasks are validated
/// against the configured tiers, a client is built for every provider in use,
/// and the output directory is chosen. Running it then collects data until
/// [`StopHandle::request_stop`] is called.
///
/// # Examples
///
/// ```rust,no_run
/// # use weather_collector::{Collector, CollectorConfig, CollectorError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CollectorError> {
/// let config = CollectorConfig::from_file("collector.json").await?;
/// let collector = Collector::from_config(config)?;
///
/// let stop = collector.stop_handle();
/// tokio::spawn(async move {
///     let _ = tokio::signal::ctrl_c().await;
///     stop.request_stop();
/// });
///
/// let summary = collector.run().await;
/// println!("{} executions, {} failures", summary.executions, summary.failures);
/// # Ok(())
/// # }
/// ```
pub struct Collector {
    admission: Admission,
    scheduler: Scheduler,
}

impl Collector {
    /// Validates `config` and builds the HTTP clients and the JSON lines store.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Validation`] if the task set is rejected,
    /// [`CollectorError::Api`] if a client cannot be built, and
    /// [`CollectorError::Store`] if no data directory is configured and the
    /// platform one cannot be determined.
    pub fn from_config(config: CollectorConfig) -> Result<Self, CollectorError> {
        let options = config.admission_options(false);
        let admission = build_and_validate(config.tasks, &config.tiers, &config.api_keys, options)?;
        let clients = ClientSet::for_tasks(admission.tasks(), &config.api_keys)?;
        let store = match config.data_dir {
            Some(dir) => JsonLinesStore::new(dir),
            None => JsonLinesStore::in_default_dir()?,
        };
        info!("Writing collected data to {}", store.dir().display());
        Self::with_parts(admission, clients, Arc::new(store))
    }

    /// Builds a collector from already validated tasks and custom clients or storage.
    pub fn with_parts(
        admission: Admission,
        clients: ClientSet,
        store: Arc<dyn WeatherStore>,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            scheduler: Scheduler::new(admission.clone(), clients, store)?,
            admission,
        })
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.scheduler.stop_handle()
    }

    /// The validation outcome, including the estimated requests per provider.
    pub fn admission(&self) -> &Admission {
        &self.admission
    }

    pub async fn run(self) -> RunSummary {
        self.scheduler.run().await
    }
}
