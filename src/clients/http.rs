use crate::clients::error::ApiError;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

/// Sends a GET request and decodes the body as JSON.
///
/// `query` is appended as URL parameters. The API key is passed in `query` too,
/// so the URL is only logged without parameters.
pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<Value, ApiError> {
    debug!("Requesting {}", url);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ApiError::NetworkRequest(url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e.status());
            return Err(if let Some(status) = e.status() {
                ApiError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                ApiError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::InvalidBody {
            url: url.to_string(),
            source: e,
        })
}
