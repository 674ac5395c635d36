//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::crawl::Fetcher;
use crate::index::{IndexWrite, InvertedIndex};

/// Write `(relative path, contents)` pairs under `dir`, creating subdirectories.
/// Returns the written paths in input order.
pub fn write_corpus(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir {:?}: {}", parent, e));
            }
            fs::write(&path, contents).unwrap_or_else(|e| panic!("write {:?}: {}", path, e));
            path
        })
        .collect()
}

/// Index of already-stemmed, whitespace-separated documents.
pub fn index_of(docs: &[(&str, &str)]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (location, text) in docs {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        index.add_document(location, &tokens);
    }
    index
}

/// In-memory site keyed by absolute URL. Unknown URLs fetch as `None`.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        let key = Url::parse(url)
            .map(String::from)
            .unwrap_or_else(|e| panic!("bad test URL {:?}: {}", url, e));
        self.pages.insert(key, html.to_owned());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &Url, _max_redirects: usize) -> Option<String> {
        self.pages.get(url.as_str()).cloned()
    }
}
