// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the crawldex command-line interface.
//!
//! A single flat command. Each phase runs when its flag is present, in a
//! fixed order: build from `--text`, crawl from `--html`, write the index
//! and counts, then answer `--query`. Output flags take an optional path
//! and fall back to a default file name when given bare.

use std::path::PathBuf;

use clap::Parser;

use crawldex::config::Overrides;

/// Worker count used when `--threads` is given without a value.
pub const DEFAULT_THREADS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "crawldex",
    about = "Build an inverted index from text files or a web crawl, then answer ranked queries",
    version
)]
pub struct Cli {
    /// Text file or directory to index (directories are walked for .txt/.text)
    #[arg(long, value_name = "PATH")]
    pub text: Option<PathBuf>,

    /// Seed URL to crawl
    #[arg(long, value_name = "SEED_URL")]
    pub html: Option<String>,

    /// Maximum number of pages to crawl, seed included
    #[arg(long, value_name = "N")]
    pub max: Option<usize>,

    /// Use the concurrent pipeline with N worker threads
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "5")]
    pub threads: Option<usize>,

    /// Write the inverted index as JSON
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "index.json")]
    pub index: Option<PathBuf>,

    /// Write per-location word counts as JSON
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "counts.json")]
    pub counts: Option<PathBuf>,

    /// File of queries, one per line
    #[arg(long, value_name = "PATH")]
    pub query: Option<PathBuf>,

    /// Write query results as JSON
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "results.json")]
    pub results: Option<PathBuf>,

    /// Match query words exactly instead of as prefixes
    #[arg(long)]
    pub exact: bool,

    /// Configuration file (defaults to ./crawldex.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Settings the command line pins, layered over file and environment config.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            threads: self.threads,
            max_pages: self.max,
            exact: self.exact.then_some(true),
        }
    }
}
