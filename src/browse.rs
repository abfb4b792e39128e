//! Catalog browsing commands.
//!
//! Each command writes its result to `out` (stdout in the binary) and logs
//! progress through `log!`.

use crate::{
    api::{ApiClient, Product, ProductAutocomplete, ProductFilter},
    loader::load_product_page,
    log,
    routes::{CatalogEntry, product_id_from_path},
    store::{self, AUTOCOMPLETE_PRODUCTS, MANUFACTURERS, NEW_PRODUCTS, Observable, manufacturer_name},
};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::json;
use std::io::Write;

/// Load one product page (by id or page path) and print it as JSON.
pub async fn show_product(
    client: &ApiClient,
    target: &str,
    with_prices: bool,
    out: &mut impl Write,
) -> Result<()> {
    let id = product_id_from_path(target)
        .ok_or_else(|| anyhow!("`{target}` is neither a product id nor a product path"))?;

    let page = load_product_page(client, id)
        .await
        .with_context(|| format!("Failed to load product {id}"))?;

    let value = if with_prices {
        let prices = client.product_prices(id).await?;
        log!("api"; "{} prices", prices.len());
        json!({ "product": page.product, "prices": prices })
    } else {
        serde_json::to_value(&page)?
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

/// Fetch suggestions into `store` and print the entries matching `query`.
pub async fn search_products(
    client: &ApiClient,
    suggestions: &Observable<Vec<ProductAutocomplete>>,
    query: &str,
    limit: usize,
    out: &mut impl Write,
) -> Result<()> {
    let watch = suggestions.subscribe(|entries| log!("store"; "{} suggestions", entries.len()));
    let published = store::publish_autocomplete(suggestions, client.autocomplete().await);
    watch.unsubscribe();
    if !published {
        bail!("Autocomplete is unavailable at {}", client.base_url());
    }

    let entries = suggestions.get();
    let matches = store::search(&entries, query, limit);
    log!("search"; "{} of {} products match `{}`", matches.len(), entries.len(), query);

    for entry in matches {
        writeln!(out, "{}", suggestion_line(entry))?;
    }
    Ok(())
}

/// `search` against the global autocomplete store.
pub async fn search_global(
    client: &ApiClient,
    query: &str,
    limit: usize,
    out: &mut impl Write,
) -> Result<()> {
    search_products(client, &AUTOCOMPLETE_PRODUCTS, query, limit, out).await
}

/// `id  Manufacturer Name  /products/...` for one suggestion.
///
/// The page path is only known when the suggestion carries `manufacturer_id`.
fn suggestion_line(entry: &ProductAutocomplete) -> String {
    let title = format!("{:>6}  {} {}", entry.id, entry.manufacturer, entry.name);
    match &entry.manufacturer_id {
        Some(key) => {
            let path = CatalogEntry {
                id: entry.id.to_string(),
                manufacturer: entry.manufacturer.clone(),
                manufacturer_id: key.clone(),
                name: entry.name.clone(),
            }
            .page_path();
            format!("{title}  {path}")
        }
        None => title,
    }
}

/// Print manufacturers, from the API when `client` is given, otherwise from
/// the built-in catalog.
pub async fn list_manufacturers(client: Option<&ApiClient>, out: &mut impl Write) -> Result<()> {
    match client {
        Some(client) => {
            let manufacturers = client.manufacturers().await?;
            for manufacturer in manufacturers {
                writeln!(out, "{:>6}  {}", manufacturer.id, manufacturer.name)?;
            }
        }
        None => {
            for (key, name) in MANUFACTURERS.iter() {
                writeln!(out, "{key:<12}{name}")?;
            }
        }
    }
    Ok(())
}

/// Print the products of one manufacturer.
///
/// Catalog keys (`cada`) resolve to the display name the API filters on.
pub async fn browse_manufacturer(
    client: &ApiClient,
    manufacturer: &str,
    filter: ProductFilter,
    out: &mut impl Write,
) -> Result<()> {
    let manufacturer = manufacturer_name(manufacturer).unwrap_or(manufacturer);
    let products = client.manufacturer_products(manufacturer, filter).await?;
    log!("browse"; "{} products from {}", products.len(), manufacturer);

    for product in &products {
        writeln!(out, "{}", product_line(product))?;
    }
    Ok(())
}

/// `id  year  Name (pieces pcs, Category)`, with placeholders for nulls.
fn product_line(product: &Product) -> String {
    let year = product.release_year.map_or_else(|| "----".to_owned(), |year| year.to_string());
    let pieces = product.piece_count.map_or_else(|| "?".to_owned(), |count| count.to_string());
    let name = product.name.as_deref().unwrap_or("?");
    match &product.category {
        Some(category) => format!("{:>6}  {year}  {name} ({pieces} pcs, {category})", product.id),
        None => format!("{:>6}  {year}  {name} ({pieces} pcs)", product.id),
    }
}

/// Print the featured new products.
pub fn list_new_products(out: &mut impl Write) -> Result<()> {
    for label in NEW_PRODUCTS {
        writeln!(out, "{label}")?;
    }
    Ok(())
}
