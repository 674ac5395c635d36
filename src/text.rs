// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text cleaning, splitting and stemming.
//!
//! Both documents and queries go through the same pipeline so that a query
//! term and an indexed term meet in the same form:
//!
//! ```text
//! "Café  Résumés!"  ──clean──▶  "cafe  resumes"  ──split──▶  ["cafe", "resumes"]
//!                                                 ──stem───▶  ["cafe", "resum"]
//! ```
//!
//! A [`Stemmer`] is cheap to create and is never shared between tasks; every
//! worker builds its own.

use std::collections::BTreeSet;

use rust_stemmers::Algorithm;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for indexing: decompose (NFD), keep only alphabetic
/// characters and whitespace, lowercase.
///
/// Decomposition splits an accented letter into base + combining mark. The
/// mark is not alphabetic, so it is dropped along with digits and punctuation:
/// - "café" → "cafe"
/// - "naïve, 2nd" → "naive nd"
/// - "tummalachērla" → "tummalacherla"
pub fn clean(text: &str) -> String {
    text.nfd()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Split already-cleaned text on whitespace, dropping empty pieces.
pub fn split(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Clean then split: the raw words of a line, unstemmed.
pub fn parse(text: &str) -> Vec<String> {
    split(&clean(text)).into_iter().map(str::to_owned).collect()
}

/// English Snowball stemmer.
pub struct Stemmer {
    inner: rust_stemmers::Stemmer,
}

impl Default for Stemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

/// Stems of every word in `line`, in document order, duplicates kept.
pub fn stem_line(line: &str, stemmer: &Stemmer) -> Vec<String> {
    parse(line)
        .iter()
        .map(|word| stemmer.stem(word))
        .filter(|stem| !stem.is_empty())
        .collect()
}

/// Distinct stems of `line`, sorted. This is the shape of a query.
pub fn unique_stems(line: &str, stemmer: &Stemmer) -> BTreeSet<String> {
    stem_line(line, stemmer).into_iter().collect()
}
