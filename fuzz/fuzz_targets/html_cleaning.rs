// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for HTML stripping and link extraction.
//!
//! Pages on the web are rarely well formed. Unclosed comments, stray `<` and
//! half-written entities must not panic. Stripping never grows the text, and
//! every extracted link is an absolute http(s) URL without a fragment.

#![no_main]

use crawldex::crawl::{find_links, strip_html};
use libfuzzer_sys::fuzz_target;
use url::Url;

fuzz_target!(|page: &[u8]| {
    let page = String::from_utf8_lossy(page);
    let base = Url::parse("https://fuzz.test/dir/page.html").unwrap();

    let text = strip_html(&page);
    assert!(text.len() <= page.len());

    for link in find_links(&base, &page) {
        assert!(matches!(link.scheme(), "http" | "https"));
        assert!(link.fragment().is_none());
    }
});
