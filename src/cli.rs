//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// brickfront storefront CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: brickfront.toml)
    #[arg(short = 'C', long, default_value = "brickfront.toml")]
    pub config: PathBuf,

    /// Base URL of the product API
    #[arg(long = "api-url", env = "API_URL")]
    pub api_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the prerender manifest (and optionally product page data)
    Build {
        /// Products JSON file (relative to root)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Output directory (relative to root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fetch each product from the API and write its page data
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        fetch: Option<bool>,
    },

    /// Print the prerender entries without writing anything
    Routes {
        /// Products JSON file (relative to root)
        #[arg(short, long)]
        products: Option<PathBuf>,
    },

    /// Load a product page by id or path and print it as JSON
    Product {
        /// Product id, or a product path like `/products/1-cada-cada-city-bus`
        target: String,

        /// Also fetch retailer prices
        #[arg(long)]
        prices: bool,
    },

    /// Search product suggestions
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List manufacturers
    Manufacturers {
        /// Ask the API instead of using the built-in catalog
        #[arg(long)]
        remote: bool,
    },

    /// Browse the products of one manufacturer
    Browse {
        /// Manufacturer name as known to the API
        manufacturer: String,

        /// Only products released in this year
        #[arg(short = 'y', long)]
        release_year: Option<i32>,

        /// Maximum number of products
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List the featured new products
    New,
}

impl Cli {
    /// Commands that talk to the product API.
    pub const fn needs_api(&self) -> bool {
        match &self.command {
            Commands::Build { .. } | Commands::Routes { .. } | Commands::New => false,
            Commands::Manufacturers { remote } => *remote,
            Commands::Product { .. } | Commands::Search { .. } | Commands::Browse { .. } => true,
        }
    }
}
