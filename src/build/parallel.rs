// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent index construction on the work queue.
//!
//! One task per file. A task reads and stems its file into a private
//! [`InvertedIndex`] that no other thread can see, then folds it into the
//! shared index with a single `add_index` call. The shared write lock is
//! therefore taken once per file instead of once per token, and positions
//! within a file are always assigned by one thread in document order.
//!
//! The walk itself stays on the calling thread. Both entry points return
//! only after `queue.finish()`, so the index is complete when they do.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{index_file, text_files, BuildStats};
use crate::error::Result;
use crate::index::{ConcurrentInvertedIndex, InvertedIndex};
use crate::queue::WorkQueue;
use crate::text::Stemmer;

#[derive(Default)]
struct Counters {
    indexed: AtomicUsize,
    failed: AtomicUsize,
}

/// Build using an existing queue. Waits for the queue to drain before returning.
pub fn build_index_parallel(
    root: &Path,
    index: &Arc<ConcurrentInvertedIndex>,
    queue: &WorkQueue,
) -> Result<BuildStats> {
    let files = text_files(root)?;
    let counters = Arc::new(Counters::default());

    for path in files {
        let index = Arc::clone(index);
        let task_counters = Arc::clone(&counters);
        let submitted = queue.execute(move || index_one(&path, &index, &task_counters));
        if let Err(e) = submitted {
            warn!("file not queued: {}", e);
            counters.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    queue.finish();

    let stats = BuildStats {
        indexed: counters.indexed.load(Ordering::Relaxed),
        failed: counters.failed.load(Ordering::Relaxed),
    };
    info!(
        root = %root.display(),
        threads = queue.size(),
        indexed = stats.indexed,
        failed = stats.failed,
        "parallel build complete"
    );
    Ok(stats)
}

/// Build with a throwaway pool of `threads` workers.
pub fn build_index_with_threads(
    root: &Path,
    index: &Arc<ConcurrentInvertedIndex>,
    threads: usize,
) -> Result<BuildStats> {
    let queue = WorkQueue::new(threads)?;
    let stats = build_index_parallel(root, index, &queue);
    queue.shutdown();
    stats
}

fn index_one(path: &Path, shared: &ConcurrentInvertedIndex, counters: &Counters) {
    let stemmer = Stemmer::new();
    let mut local = InvertedIndex::new();

    match index_file(path, &mut local, &stemmer) {
        Ok(terms) => {
            shared.add_index(local);
            counters.indexed.fetch_add(1, Ordering::Relaxed);
            debug!(path = %path.display(), terms, "indexed");
        }
        Err(e) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            warn!("skipping file: {}", e);
        }
    }
}
