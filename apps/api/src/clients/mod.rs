//! Remote collaborator clients. Every external service (profile, parsing,
//! analysis, export) is reached through a trait seam here so handlers and
//! the pipeline can be tested against in-process fakes.
//!
//! No retry loops live at this layer: a rejected call is reported as-is and
//! the user retries the whole operation.

pub mod analysis;
pub mod export;
pub mod parsing;
pub mod profile;

use std::time::Duration;

use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Converts a non-2xx response into `ClientError::Api` with the response
/// body as the message.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}
