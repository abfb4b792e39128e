//! brickfront - storefront frontend toolkit for brick set catalogs.

mod api;
mod browse;
mod build;
mod cli;
mod config;
mod loader;
mod logger;
mod routes;
mod store;
mod utils;

use anyhow::Result;
use api::{ApiClient, ProductFilter};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use routes::{PrerenderManifest, load_catalog};
use std::io::{Write, stdout};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    init_config(SiteConfig::load(cli)?);
    let config = cfg();
    if config.config_path.exists() {
        log!("config"; "{}", config.config_path.display());
    }
    let client = ApiClient::new(&config.api.url);
    if cli.needs_api() {
        log!("api"; "{}", client.base_url());
    }
    let mut out = stdout().lock();

    match &cli.command {
        Commands::Build { .. } => {
            let client = config.build.fetch.then_some(&client);
            let report = build_site(&config, client).await?;
            log!(
                "build";
                "done: {} entries, {} pages prerendered",
                report.manifest.entries.len(),
                report.pages_written
            );
            Ok(())
        }
        Commands::Routes { .. } => {
            let manifest = PrerenderManifest::from_catalog(&load_catalog(&config.build.products));
            for entry in &manifest.entries {
                writeln!(out, "{entry}")?;
            }
            Ok(())
        }
        Commands::Product { target, prices } => {
            browse::show_product(&client, target, *prices, &mut out).await
        }
        Commands::Search { query, limit } => {
            browse::search_global(&client, &query.join(" "), *limit, &mut out).await
        }
        Commands::Manufacturers { remote } => {
            browse::list_manufacturers(remote.then_some(&client), &mut out).await
        }
        Commands::Browse {
            manufacturer,
            release_year,
            limit,
        } => {
            let filter = ProductFilter {
                release_year: *release_year,
                limit: *limit,
            };
            browse::browse_manufacturer(&client, manufacturer, filter, &mut out).await
        }
        Commands::New => browse::list_new_products(&mut out),
    }
}
