//! Prerender build.
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_catalog()        products.json → entries (empty on failure)
//!     │
//!     ├── PrerenderManifest     "*" + one path per product
//!     │       └── write prerender.json
//!     │
//!     └── prerender_pages()     (build.fetch) loader per path → __data.json
//! ```

use crate::{
    api::ApiClient,
    config::SiteConfig,
    loader::{load_product_page, write_page_data},
    log,
    logger::Progress,
    routes::{PrerenderManifest, load_catalog, product_id_from_path},
};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};

/// File name of the prerender manifest inside the output directory
pub const MANIFEST_FILE: &str = "prerender.json";

/// Summary of a finished build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub manifest: PrerenderManifest,
    /// Number of product pages whose data was written
    pub pages_written: usize,
}

/// Build the manifest and, when `config.build.fetch` is set, the page data.
///
/// `client` is required only for fetching; a missing products file never
/// fails the build.
pub async fn build_site(config: &SiteConfig, client: Option<&ApiClient>) -> Result<BuildReport> {
    let output = &config.build.output;

    let catalog = load_catalog(&config.build.products);
    log!("build"; "{} product pages", catalog.len());

    let manifest = PrerenderManifest::from_catalog(&catalog);
    write_manifest(output, &manifest)?;

    let pages_written = if config.build.fetch {
        let client = client.ok_or_else(|| anyhow!("Fetching page data requires an API client"))?;
        prerender_pages(client, output, &manifest).await?
    } else {
        0
    };

    Ok(BuildReport {
        manifest,
        pages_written,
    })
}

/// Write `manifest` as pretty JSON into `output`.
fn write_manifest(output: &Path, manifest: &PrerenderManifest) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let path = output.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    log!("build"; "{} entries -> {}", manifest.entries.len(), MANIFEST_FILE);
    Ok(())
}

/// Load every product page in order and write its data.
///
/// The first failure aborts the build.
async fn prerender_pages(
    client: &ApiClient,
    output: &Path,
    manifest: &PrerenderManifest,
) -> Result<usize> {
    let paths: Vec<&str> = manifest.product_paths().collect();
    let progress = Progress::new("prerender", paths.len());
    let mut written = 0;

    for path in paths {
        let result = prerender_page(client, output, path).await;
        if let Err(err) = result {
            progress.finish();
            return Err(err);
        }
        written += 1;
        progress.inc();
    }

    progress.finish();
    log!("prerender"; "{written} pages from {}", client.base_url());
    Ok(written)
}

async fn prerender_page(client: &ApiClient, output: &Path, path: &str) -> Result<()> {
    let id = product_id_from_path(path).ok_or_else(|| anyhow!("No product id in `{path}`"))?;
    let page = load_product_page(client, id)
        .await
        .with_context(|| format!("Failed to load {path}"))?;
    write_page_data(output, path, &page)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::loader::{PAGE_DATA_FILE, ProductPage};
    use tempfile::TempDir;

    const PRODUCTS: &str = r#"[
        {"id": 1, "manufacturer": "CaDA", "manufacturer_id": "cada", "name": "City Bus"},
        {"id": 2, "manufacturer": "COBI", "manufacturer_id": "cobi", "name": "Tiger I"}
    ]"#;

    fn product_json(id: u64, manufacturer: &str, key: &str, name: &str) -> String {
        format!(
            r#"{{"id": {id}, "manufacturer_id": "{key}", "name": "{name}", "manufacturer": "{manufacturer}",
                "category": "Vehicles", "base_image_url": "", "description": "", "piece_count": 100,
                "minifigures": 1, "release_year": 2024, "created_at": "2024-05-01T00:00:00"}}"#
        )
    }

    fn config_in(dir: &TempDir, fetch: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.products = dir.path().join("products.json");
        config.build.output = dir.path().join("dist");
        config.build.fetch = fetch;
        config
    }

    fn read_manifest(config: &SiteConfig) -> PrerenderManifest {
        let json = fs::read_to_string(config.build.output.join(MANIFEST_FILE)).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[tokio::test]
    async fn test_build_writes_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
        let config = config_in(&dir, false);

        let report = build_site(&config, None).await.unwrap();
        assert_eq!(report.pages_written, 0);
        assert_eq!(
            read_manifest(&config).entries,
            vec!["*", "/products/1-cada-cada-city-bus", "/products/2-cobi-cobi-tiger-i"]
        );
    }

    #[tokio::test]
    async fn test_build_missing_products_degrades() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, false);

        let report = build_site(&config, None).await.unwrap();
        assert_eq!(report.manifest.entries, vec!["*"]);
        assert_eq!(read_manifest(&config).entries, vec!["*"]);
    }

    #[tokio::test]
    async fn test_build_products_directory_degrades() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, false);
        config.build.products = dir.path().to_path_buf();

        let report = build_site(&config, None).await.unwrap();
        assert_eq!(report.manifest.entries, vec!["*"]);
        assert_eq!(read_manifest(&config).entries, vec!["*"]);
    }

    #[tokio::test]
    async fn test_build_fetch_writes_page_data() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
        let config = config_in(&dir, true);

        let bus = product_json(1, "CaDA", "cada", "City Bus");
        let tiger = product_json(2, "COBI", "cobi", "Tiger I");
        let api = MockApi::start(&[
            ("/products/1", 200, bus.as_str()),
            ("/products/2", 200, tiger.as_str()),
        ]);
        let client = ApiClient::new(&api.base_url);

        let report = build_site(&config, Some(&client)).await.unwrap();
        assert_eq!(report.pages_written, 2);

        let data = config
            .build
            .output
            .join("products/2-cobi-cobi-tiger-i")
            .join(PAGE_DATA_FILE);
        let page: ProductPage = serde_json::from_str(&fs::read_to_string(data).unwrap()).unwrap();
        assert_eq!(page.product.name.as_deref(), Some("Tiger I"));
    }

    #[tokio::test]
    async fn test_build_fetch_failure_aborts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
        let config = config_in(&dir, true);

        let bus = product_json(1, "CaDA", "cada", "City Bus");
        let api = MockApi::start(&[("/products/1", 200, bus.as_str())]);
        let client = ApiClient::new(&api.base_url);

        let err = build_site(&config, Some(&client)).await.unwrap_err();
        assert!(format!("{err:#}").contains("/products/2-cobi-cobi-tiger-i"));
    }

    #[tokio::test]
    async fn test_build_fetch_without_client_fails() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, true);
        assert!(build_site(&config, None).await.is_err());
    }
}
