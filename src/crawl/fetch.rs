// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page retrieval.
//!
//! A fetch either yields an HTML document or nothing. Network failures,
//! non-200 statuses, non-HTML content and redirect chains that run too long
//! all collapse into `None`; the crawler treats every one of them as "no
//! content to index".

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Source of HTML pages.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetch `url`, following at most `max_redirects` redirect hops.
    fn fetch(&self, url: &Url, max_redirects: usize) -> Option<String>;
}

/// Blocking HTTP(S) fetcher.
///
/// Redirects are followed here rather than by the client so the hop limit
/// is exactly the one the caller passes.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .user_agent(concat!("crawldex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url, max_redirects: usize) -> Option<String> {
        let mut current = url.clone();
        let mut hops = 0;

        loop {
            let response = match self.client.get(current.clone()).send() {
                Ok(response) => response,
                Err(e) => {
                    debug!(url = %current, "fetch failed: {}", e);
                    return None;
                }
            };

            let status = response.status();
            if status.is_redirection() {
                if hops == max_redirects {
                    debug!(url = %url, hops, "redirect limit reached");
                    return None;
                }
                let target = response.headers().get(LOCATION)?.to_str().ok()?;
                current = current.join(target).ok()?;
                hops += 1;
                continue;
            }

            if status != StatusCode::OK || !is_html(response.headers()) {
                debug!(url = %current, %status, "not an HTML page");
                return None;
            }

            return match response.text() {
                Ok(body) => Some(body),
                Err(e) => {
                    debug!(url = %current, "body unreadable: {}", e);
                    None
                }
            };
        }
    }
}

/// True when the MIME essence (before any `;` parameters) is `text/html`.
fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            let essence = value.split(';').next().unwrap_or_default();
            essence.trim().eq_ignore_ascii_case("text/html")
        })
}
