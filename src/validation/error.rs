use crate::limits::limit::Limit;
use crate::types::data_kind::DataKind;
use crate::types::provider::Provider;
use thiserror::Error;

/// Configuration-time problems that keep a task set from being scheduled.
///
/// Task indices are zero-based positions in the task list that was validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Task #{index} ({task}) is incomplete: it needs a location, a provider, a data kind and a positive interval")]
    IncompleteTask { index: usize, task: String },

    #[error("Task #{index} uses provider {provider}, which has been retired")]
    RetiredProvider { index: usize, provider: Provider },

    #[error("Task #{index} uses unsupported provider {provider}")]
    UnsupportedProvider { index: usize, provider: Provider },

    #[error("Task #{index} requests {data_kind} data, which {provider} does not provide")]
    UnsupportedDataKind {
        index: usize,
        provider: Provider,
        data_kind: DataKind,
    },

    #[error("Task #{index} uses location '{location}', which {provider} cannot look up")]
    UnsupportedLocation {
        index: usize,
        provider: Provider,
        location: String,
    },

    #[error("Provider {0} requires an API key, but none is configured")]
    MissingCredential(Provider),

    #[error("Tasks #{first} and #{second} both collect {data_kind} data for '{location}' from {provider}")]
    DuplicateTask {
        first: usize,
        second: usize,
        provider: Provider,
        data_kind: DataKind,
        location: String,
    },

    #[error("Tasks for {provider} would need up to {estimated} requests, but the plan allows {limit}")]
    LimitExceeded {
        provider: Provider,
        estimated: u64,
        limit: Limit,
    },

    #[error("Task #{index} has a non-positive interval, which can never be within a request limit")]
    NonPositiveInterval { index: usize },
}
