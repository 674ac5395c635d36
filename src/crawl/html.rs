// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTML to text, and hyperlink extraction.
//!
//! Regex-based, not a parser. Good enough for indexing: the goal is the
//! visible words of a page in reading order, and the pages it links to.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

/// Elements whose whole content is dropped, not just their tags.
const BLOCK_ELEMENTS: &[&str] = &["head", "style", "script", "noscript", "svg"];

static COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)<!--.*?-->"));

static BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BLOCK_ELEMENTS
        .iter()
        .map(|tag| compile(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")))
        .collect()
});

static TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)<[^>]*>"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,9});"));

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
});

/// Patterns are literals; a failure here is a programming error caught by tests.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

/// Remove comments, non-visible elements and tags, then decode entities.
///
/// Removed markup is replaced by a single space so that words on either side
/// of a tag never merge.
pub fn strip_html(html: &str) -> String {
    let mut text = COMMENT.replace_all(html, " ").into_owned();
    for block in BLOCKS.iter() {
        text = block.replace_all(&text, " ").into_owned();
    }
    let text = TAG.replace_all(&text, " ");
    unescape_entities(&text)
}

/// Decode named (common subset) and numeric character references.
/// Unknown references are left as written.
pub fn unescape_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            decode_entity(name).map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(decoded)
}

/// Drop the fragment; the remaining URL string is the page's location key.
pub fn canonicalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Absolute, canonical `http(s)` targets of every anchor in `html`, in document order.
pub fn find_links(base: &Url, html: &str) -> Vec<Url> {
    let html = COMMENT.replace_all(html, " ");
    ANCHOR_HREF
        .captures_iter(&html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .filter_map(|href| base.join(unescape_entities(href.as_str().trim()).as_str()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(canonicalize)
        .collect()
}
