//! `[api]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[api]` section in brickfront.toml - product API access.
///
/// # Example
/// ```toml
/// [api]
/// url = "https://api.example.com"
/// ```
///
/// The `API_URL` environment variable and `--api-url` flag take precedence.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "defaults::api::url")]
    #[educe(Default = defaults::api::url())]
    pub url: String,
}
