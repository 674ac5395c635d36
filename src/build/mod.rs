// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction from text files on disk.
//!
//! A root path is either a single file (indexed whatever its extension) or a
//! directory walked recursively for `.txt`/`.text` files. Each file becomes
//! one location, keyed by its path as given.
//!
//! A document is read completely before anything reaches the index. A read
//! error drops the whole file with a warning instead of leaving half a
//! document behind; the walk moves on to the next file.
//!
//! The sequential form lives here; the work-queue form is in [`parallel`].

pub mod parallel;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use parallel::{build_index_parallel, build_index_with_threads};

use crate::error::{Error, Result};
use crate::index::IndexWrite;
use crate::text::{stem_line, Stemmer};

/// Extensions (lowercase) picked up during a directory walk.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Outcome of a build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Files read successfully (including ones with no terms).
    pub indexed: usize,
    /// Files skipped because they could not be read.
    pub failed: usize,
}

/// Case-insensitive `.txt` / `.text` check.
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Files to index under `root`, sorted.
pub fn text_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::NotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_text_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    Ok(files)
}

/// Location key for a file.
pub fn location_of(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Every stem of a file, in document order. All or nothing.
pub fn read_stems(path: &Path, stemmer: &Stemmer) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut stems = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        stems.extend(stem_line(&line, stemmer));
    }
    Ok(stems)
}

/// Index one file into `index`. Returns the number of terms added.
pub fn index_file<W: IndexWrite + ?Sized>(
    path: &Path,
    index: &mut W,
    stemmer: &Stemmer,
) -> Result<usize> {
    let stems = read_stems(path, stemmer)?;
    Ok(index.add_document(&location_of(path), &stems))
}

/// Build sequentially: one file after another on the calling thread.
pub fn build_index<W: IndexWrite + ?Sized>(root: &Path, index: &mut W) -> Result<BuildStats> {
    let stemmer = Stemmer::new();
    let mut stats = BuildStats::default();

    for path in text_files(root)? {
        match index_file(&path, index, &stemmer) {
            Ok(terms) => {
                debug!(path = %path.display(), terms, "indexed");
                stats.indexed += 1;
            }
            Err(e) => {
                warn!("skipping file: {}", e);
                stats.failed += 1;
            }
        }
    }

    info!(root = %root.display(), indexed = stats.indexed, failed = stats.failed, "build complete");
    Ok(stats)
}
