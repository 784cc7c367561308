//! Application configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

/// Bounds for the crawl concurrency setting.
const MIN_CONCURRENCY: usize = 2;
const MAX_CONCURRENCY: usize = 16;

/// Runtime configuration, built from defaults plus `HWDB_*` environment
/// variables (e.g. `HWDB_DATA_ROOT`, `HWDB_CRAWL_CONCURRENCY`).
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Root of the submission tree (`<contributor>/<type>/<unit>`).
    pub data_root: PathBuf,
    /// How many units are crawled concurrently.
    pub crawl_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_root: PathBuf::from("data"),
            crawl_concurrency: 8,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .set_default("data_root", "data")?
            .set_default("crawl_concurrency", 8_i64)?
            .add_source(Environment::with_prefix("HWDB"))
            .build()
            .context("failed to build configuration")?;
        let mut cfg: AppConfig = cfg
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        cfg.crawl_concurrency = cfg.crawl_concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
        Ok(cfg)
    }

    /// Configuration pointing at a specific data root, keeping defaults for
    /// everything else.
    pub fn with_data_root(data_root: impl Into<PathBuf>) -> Self {
        AppConfig {
            data_root: data_root.into(),
            ..AppConfig::default()
        }
    }
}
