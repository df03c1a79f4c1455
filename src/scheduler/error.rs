use crate::types::provider::Provider;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("No client registered for provider {0}, which admitted tasks use")]
    MissingClient(Provider),
}
