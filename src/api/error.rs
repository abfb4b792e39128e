//! API error types.

use thiserror::Error;

/// Failure of a single backend request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to `{url}` failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from `{url}`")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
