//! Product detail page loader.
//!
//! One request per page: `GET {API_URL}/products/{id}`. The product is passed
//! through to the page unchanged. There is no retry, and failures propagate
//! to the caller as-is.

use crate::api::{ApiClient, ApiError, Product};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// File name of prerendered page data inside a page directory
pub const PAGE_DATA_FILE: &str = "__data.json";

/// Data handed to the product page template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub product: Product,
}

/// Load the page data for product `id`.
pub async fn load_product_page(client: &ApiClient, id: u64) -> Result<ProductPage, ApiError> {
    let product = client.product(id).await?;
    Ok(ProductPage { product })
}

/// Location of the page data for `page_path` under `output`.
///
/// `/products/1-cada-cada-city-bus` → `{output}/products/1-cada-cada-city-bus/__data.json`
///
/// Page paths come from `products.json` unchecked; any `..` component
/// is rejected so the data always lands inside `output`.
pub fn page_data_path(output: &Path, page_path: &str) -> Result<PathBuf> {
    let relative = Path::new(page_path.trim_matches('/'));
    let normal = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !normal || relative.as_os_str().is_empty() {
        bail!("Refusing to write page data for `{page_path}` outside the output directory");
    }
    Ok(output.join(relative).join(PAGE_DATA_FILE))
}

/// Write page data as pretty JSON, creating parent directories.
pub fn write_page_data(output: &Path, page_path: &str, page: &ProductPage) -> Result<PathBuf> {
    let path = page_data_path(output, page_path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(page)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
