//! `[build]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in brickfront.toml - prerender settings.
///
/// # Example
/// ```toml
/// [build]
/// products = "data/products.json"
/// output = "dist"
/// fetch = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root, set from the CLI after loading.
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Product list used to enumerate product pages.
    #[serde(default = "defaults::build::products")]
    #[educe(Default = defaults::build::products())]
    pub products: PathBuf,

    /// Directory receiving the manifest and page data.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Fetch every product page from the API during the build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub fetch: bool,
}
