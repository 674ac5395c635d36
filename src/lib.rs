//! Positional inverted index with concurrent construction, a bounded web
//! crawler, and ranked query processing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │   build/     │   │   crawl/     │   text files / web pages
//! │ (walk, read, │   │ (fetch, html,│
//! │  stem)       │   │  links)      │
//! └──────┬───────┘   └──────┬───────┘
//!        │  page-local InvertedIndex, merged once per document
//!        ▼                  ▼
//! ┌─────────────────────────────────────┐     ┌──────────────┐
//! │               index/                │────▶│   search/    │
//! │ InvertedIndex · ConcurrentInverted- │     │ (canonical   │
//! │ Index (one RwLock)                  │     │  query, rank)│
//! └─────────────────────────────────────┘     └──────┬───────┘
//!        ▲                                           ▼
//! ┌──────┴───────┐                            ┌──────────────┐
//! │   queue      │  worker pool for           │  scoring/    │
//! │ (WorkQueue)  │  build, crawl and search   │ (Score, sort)│
//! └──────────────┘                            └──────────────┘
//! ```
//!
//! Every stage has a sequential form that works on a plain
//! [`InvertedIndex`] and a concurrent form that shares a
//! [`ConcurrentInvertedIndex`] across [`WorkQueue`] tasks. Both produce the
//! same index and the same query results.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use crawldex::{build_index, InvertedIndex, QueryProcessor, SearchMode, SequentialQueryProcessor};
//!
//! let mut index = InvertedIndex::new();
//! build_index(Path::new("corpus"), &mut index)?;
//!
//! let mut queries = SequentialQueryProcessor::new(&index, SearchMode::Partial);
//! queries.process_line("hello world");
//! println!("{}", queries.results_json()?);
//! # Ok::<(), crawldex::Error>(())
//! ```

pub mod build;
pub mod config;
pub mod crawl;
pub mod error;
pub mod index;
pub mod json;
pub mod queue;
pub mod scoring;
pub mod search;
pub mod text;

#[doc(hidden)]
pub mod testing;

pub use build::{build_index, build_index_parallel, build_index_with_threads, BuildStats};
pub use config::Config;
pub use crawl::{CrawlConfig, Fetcher, HttpFetcher, WebCrawler};
pub use error::{Error, Result};
pub use index::{ConcurrentInvertedIndex, IndexRead, IndexWrite, InvertedIndex};
pub use queue::WorkQueue;
pub use scoring::{compare_scores, sort_scores, Score};
pub use search::{
    canonical_query, ConcurrentQueryProcessor, QueryProcessor, QueryResults, SearchMode,
    SequentialQueryProcessor,
};
pub use text::Stemmer;
