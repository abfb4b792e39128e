//! Configuration management for `brickfront.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                   |
//! |-----------|-------------------------------------------|
//! | `[api]`   | Product API base URL                      |
//! | `[build]` | Products file, output dir, page prefetch  |
//!
//! # Example
//!
//! ```toml
//! [api]
//! url = "https://api.example.com"
//!
//! [build]
//! products = "src/lib/data/products.json"
//! output = "dist"
//! fetch = true
//! ```
//!
//! The file is optional. Values resolve as CLI flag, then `API_URL`
//! environment variable, then file, then built-in default.

mod api;
mod build;
pub mod defaults;
mod error;
mod handle;

pub use handle::{cfg, init_config};

use api::ApiConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name
pub const DEFAULT_CONFIG_NAME: &str = "brickfront.toml";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing brickfront.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Product API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides, and validate.
    ///
    /// A missing file is only an error when a non-default name was requested.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else if cli.config != Path::new(DEFAULT_CONFIG_NAME) {
            bail!("Config file not found: {}", config_path.display());
        } else {
            Self::default()
        };

        config.config_path = Self::normalize_path(&config_path);
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.api.url, cli.api_url.as_ref());

        match &cli.command {
            Commands::Build {
                products,
                output,
                fetch,
            } => {
                Self::update_option(&mut self.build.products, products.as_ref());
                Self::update_option(&mut self.build.output, output.as_ref());
                Self::update_option(&mut self.build.fetch, fetch.as_ref());
            }
            Commands::Routes { products } => {
                Self::update_option(&mut self.build.products, products.as_ref());
            }
            _ => {}
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.build.products = Self::normalize_path(&root.join(expand_tilde(&self.build.products)));
        self.build.output = Self::normalize_path(&root.join(expand_tilde(&self.build.output)));
        self.build.root = Some(root);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.url.trim();
        if url.is_empty() {
            bail!(ConfigError::Validation("[api.url] must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(ConfigError::Validation(
                "[api.url] must start with http:// or https://".into()
            ));
        }
        Ok(())
    }
}

/// Expand a leading `~` in a path. Absolute results ignore the root on join.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Tests
// ============================================================================
