// Runtime configuration: where the API lives, how many rows a page shows
// and how long a request may take. Values come from the environment
// (optionally a `.env` file loaded by `main`), then CLI flags override.

use std::time::Duration;

use reqwest::Url;

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::error::{CatalogError, Result};

pub const DEFAULT_BASE_URL: &str = "https://1c-tg-bot-deenfoool.amvera.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "NOMENCLATURE_API_URL";
pub const ENV_PAGE_SIZE: &str = "NOMENCLATURE_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "NOMENCLATURE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    pub page_size: usize,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build a config from the process environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.set_base_url(&url)?;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            let size = size.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{ENV_PAGE_SIZE}: not a number: {size}"))
            })?;
            config.set_page_size(size)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{ENV_TIMEOUT_SECS}: not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn set_base_url(&mut self, raw: &str) -> Result<()> {
        let url = Url::parse(raw.trim())
            .map_err(|e| CatalogError::InvalidUrl(format!("{raw}: {e}")))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(format!("{raw}: expected an http(s) URL")));
        }
        self.base_url = url;
        Ok(())
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(CatalogError::Config("page size must be at least 1".into()));
        }
        self.page_size = size;
        Ok(())
    }
}
