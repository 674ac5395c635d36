// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Web crawling into a shared index.
//!
//! Every page is one work-queue task: fetch, queue newly discovered links,
//! strip markup, stem, and merge a page-local index into the shared one.
//! A page's location is its canonical URL (fragment removed).
//!
//! The crawl is bounded by `max_pages`. With the default of one, only the
//! seed is fetched and links are never followed. Above one, links are
//! admitted breadth-first in discovery order until the visited set holds
//! `max_pages` URLs.
//!
//! # Invariants
//!
//! - A URL is fetched at most once per crawler: admission into the visited
//!   set is a single check-and-insert under one lock.
//! - The visited set never exceeds `max_pages` entries.
//! - [`WebCrawler::crawl`] returns only after every admitted page has been
//!   processed.

pub mod fetch;
pub mod html;

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use url::Url;

pub use fetch::{Fetcher, HttpFetcher};
pub use html::{canonicalize, find_links, strip_html};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::{ConcurrentInvertedIndex, IndexWrite, InvertedIndex};
use crate::queue::WorkQueue;
use crate::text::{stem_line, Stemmer};

/// Crawl limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Most pages ever admitted, seed included. Clamped to at least one.
    pub max_pages: usize,
    /// Redirect hops allowed per fetch.
    pub max_redirects: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 1,
            max_redirects: 3,
        }
    }
}

impl From<&Config> for CrawlConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_pages: config.max_pages,
            max_redirects: config.max_redirects,
        }
    }
}

struct CrawlState<F> {
    index: Arc<ConcurrentInvertedIndex>,
    queue: Arc<WorkQueue>,
    fetcher: F,
    visited: Mutex<HashSet<String>>,
    config: CrawlConfig,
}

pub struct WebCrawler<F: Fetcher> {
    state: Arc<CrawlState<F>>,
}

impl<F: Fetcher> WebCrawler<F> {
    pub fn new(
        index: Arc<ConcurrentInvertedIndex>,
        queue: Arc<WorkQueue>,
        fetcher: F,
        mut config: CrawlConfig,
    ) -> Self {
        config.max_pages = config.max_pages.max(1);
        Self {
            state: Arc::new(CrawlState {
                index,
                queue,
                fetcher,
                visited: Mutex::new(HashSet::new()),
                config,
            }),
        }
    }

    /// Crawl from `seed` and wait for every admitted page.
    ///
    /// Only an unparsable seed is an error. A seed that was already visited,
    /// or that fails to fetch, leaves the index untouched.
    pub fn crawl(&self, seed: &str) -> Result<()> {
        let url = Url::parse(seed).map_err(|source| Error::InvalidUrl {
            url: seed.to_owned(),
            source,
        })?;
        let url = canonicalize(url);

        if !self.state.try_visit(&url) {
            debug!(url = %url, "seed not admitted");
            return Ok(());
        }

        CrawlState::submit(&self.state, url)?;
        self.state.queue.finish();

        info!(
            seed,
            visited = self.state.visited.lock().len(),
            "crawl complete"
        );
        Ok(())
    }

    /// Admitted URLs, sorted.
    pub fn visited(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.state.visited.lock().iter().cloned().collect();
        urls.sort();
        urls
    }

    pub fn index(&self) -> &Arc<ConcurrentInvertedIndex> {
        &self.state.index
    }
}

impl<F: Fetcher> CrawlState<F> {
    /// Admit `url` unless it was seen before or the page budget is spent.
    fn try_visit(&self, url: &Url) -> bool {
        let mut visited = self.visited.lock();
        if visited.len() >= self.config.max_pages || visited.contains(url.as_str()) {
            return false;
        }
        visited.insert(url.as_str().to_owned())
    }

    fn submit(state: &Arc<Self>, url: Url) -> Result<()> {
        let task_state = Arc::clone(state);
        state.queue.execute(move || Self::process(&task_state, url))
    }

    fn process(state: &Arc<Self>, url: Url) {
        let Some(page) = state.fetcher.fetch(&url, state.config.max_redirects) else {
            debug!(url = %url, "no content");
            return;
        };

        if state.config.max_pages > 1 {
            for link in find_links(&url, &page) {
                if state.try_visit(&link) {
                    if let Err(e) = Self::submit(state, link) {
                        warn!("link not queued: {}", e);
                    }
                }
            }
        }

        let stemmer = Stemmer::new();
        let stems: Vec<String> = strip_html(&page)
            .lines()
            .flat_map(|line| stem_line(line, &stemmer))
            .collect();

        let mut local = InvertedIndex::new();
        let terms = local.add_document(url.as_str(), &stems);
        state.index.add_index(local);
        debug!(url = %url, terms, "page indexed");
    }
}
