use crate::clients::error::ApiError;
use crate::config::ConfigError;
use crate::scheduler::error::SchedulerError;
use crate::store::error::StoreError;
use crate::types::location::LocationError;
use crate::validation::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Location(#[from] LocationError),
}
