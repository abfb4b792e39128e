//! Product page routes for prerendering.
//!
//! Reads the build-time product list and derives one canonical page path per
//! product:
//!
//! ```text
//! /products/{id}-{slug(manufacturer)}-{manufacturer_id}-{slug(name)}
//! ```
//!
//! The paths, preceded by the `*` wildcard entry, form the prerender
//! manifest handed to the static host.

use crate::{log, utils::slug::slugify};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fs, path::Path};

/// URL prefix of every product page
pub const PRODUCTS_PREFIX: &str = "/products/";

/// Catch-all entry for pages not enumerated from the product list
pub const WILDCARD_ENTRY: &str = "*";

/// The fields of a `products.json` record that make up its page path.
///
/// Fields are taken as text whatever their JSON type, and missing fields
/// fall back to defaults, so a malformed record still yields a (degenerate)
/// path rather than dropping the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    #[serde(deserialize_with = "as_text")]
    pub id: String,
    #[serde(deserialize_with = "as_text")]
    pub manufacturer: String,
    #[serde(deserialize_with = "as_text")]
    pub manufacturer_id: String,
    #[serde(deserialize_with = "as_text")]
    pub name: String,
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self {
            id: "0".to_owned(),
            manufacturer: String::new(),
            manufacturer_id: String::new(),
            name: String::new(),
        }
    }
}

/// Render any JSON value as it would appear interpolated into a path.
///
/// Strings are taken verbatim, `null` is empty, everything else is its JSON
/// text (`2417`, `-3`, `true`).
fn as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl CatalogEntry {
    /// Canonical page path of this product.
    pub fn page_path(&self) -> String {
        format!(
            "{}{}-{}-{}-{}",
            PRODUCTS_PREFIX,
            self.id,
            slugify(&self.manufacturer),
            self.manufacturer_id,
            slugify(&self.name)
        )
    }
}

/// Read and parse the product list.
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read the product list, treating any read or parse failure as an empty list.
///
/// A broken product file only costs the product pages; the rest of the site
/// still builds.
pub fn load_catalog(path: &Path) -> Vec<CatalogEntry> {
    match read_catalog(path) {
        Ok(entries) => entries,
        Err(err) => {
            log!("warn"; "no product pages: {:#}", err);
            Vec::new()
        }
    }
}

/// Page paths for every entry, in input order.
pub fn product_paths(entries: &[CatalogEntry]) -> Vec<String> {
    entries.iter().map(CatalogEntry::page_path).collect()
}

/// Extract the product id from a page path or its final segment.
///
/// `/products/1-cada-cada-city-bus`, `1-cada-cada-city-bus` and `1` all
/// yield `Some(1)`.
pub fn product_id_from_path(path: &str) -> Option<u64> {
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let id = segment.split('-').next()?;
    id.parse().ok()
}

// ============================================================================
// Prerender Manifest
// ============================================================================

/// Pages the static host should prerender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerenderManifest {
    /// `*` followed by one path per product
    pub entries: Vec<String>,
    /// Follow links from prerendered pages to discover more
    pub crawl: bool,
}

impl PrerenderManifest {
    pub fn from_catalog(entries: &[CatalogEntry]) -> Self {
        let mut all = Vec::with_capacity(entries.len() + 1);
        all.push(WILDCARD_ENTRY.to_owned());
        all.extend(product_paths(entries));
        Self {
            entries: all,
            crawl: true,
        }
    }

    /// Product page paths, without the wildcard.
    pub fn product_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|entry| entry.starts_with(PRODUCTS_PREFIX))
    }
}
