// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON output helpers.
//!
//! Output is rendered to a string first and written afterwards, so callers
//! holding an index read lock only hold it for the rendering.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Pretty-print with 2-space indentation. Map key order is the value's own
/// iteration order (`BTreeMap` everywhere in this crate, so lexicographic).
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write JSON text to `path`, creating parent directories as needed.
pub fn write_json_file(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| Error::io(path, e))
}
