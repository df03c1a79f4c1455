use crate::types::data_kind::DataKind;
use crate::types::provider::Provider;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response body from {url} is not valid JSON")]
    InvalidBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} reported an error for {url}: {message}")]
    Provider {
        provider: Provider,
        url: String,
        message: String,
    },

    #[error("Provider {0} requires an API key, but none is configured")]
    MissingCredential(Provider),

    #[error("Provider {0} is not supported")]
    UnsupportedProvider(Provider),

    #[error("Provider {0} has been retired and can no longer be queried")]
    RetiredProvider(Provider),

    #[error("Provider {provider} does not support {data_kind} data")]
    UnsupportedDataKind {
        provider: Provider,
        data_kind: DataKind,
    },

    #[error("Provider {provider} cannot look up location '{location}'")]
    UnsupportedLocation { provider: Provider, location: String },
}
