// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! Layers, lowest priority first: built-in defaults, a TOML file
//! (`crawldex.toml` unless `--config` names another), `CRAWLDEX_*`
//! environment variables, then whatever the command line set explicitly.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "crawldex.toml";

/// Environment variable prefix (`CRAWLDEX_THREADS=8`).
pub const ENV_PREFIX: &str = "CRAWLDEX_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads for the concurrent pipeline.
    pub threads: usize,
    /// Redirect hops a single fetch may follow.
    pub max_redirects: usize,
    /// Upper bound on crawled pages, seed included.
    pub max_pages: usize,
    pub fetch_timeout_secs: u64,
    /// Exact matching instead of prefix matching.
    pub exact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: 1,
            max_redirects: 3,
            max_pages: 1,
            fetch_timeout_secs: 10,
            exact: false,
        }
    }
}

/// Values set explicitly on the command line. `None` leaves the lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl Config {
    /// Merge every layer and extract the final configuration.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let toml = match file {
            Some(path) => Toml::file(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(toml)
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(config.normalized())
    }

    /// Clamp values that would make the pipeline degenerate.
    pub fn normalized(mut self) -> Self {
        self.threads = self.threads.max(1);
        self.max_pages = self.max_pages.max(1);
        self
    }

    /// Whether the thread-safe index and worker pool should be used.
    pub fn is_concurrent(&self, crawling: bool) -> bool {
        crawling || self.threads > 1
    }
}
