//! Tag extraction: find `<tag>…</tag>` substrings directly instead of
//! building a document tree. Unknown tags are never looked at.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use regex::Regex;

lazy_static::lazy_static! {
    static ref TAG_REGEX_CACHE: Mutex<LruCache<String, Arc<Regex>>> =
        Mutex::new(LruCache::new(NonZeroUsize::new(32).unwrap()));
}

/// Non-greedy, dot-matches-newline pattern for one tag
fn tag_pattern(tag: &str) -> String {
    let tag = regex::escape(tag);
    format!("(?s)<{tag}>(.*?)</{tag}>")
}

/// Get compiled regex with caching
fn tag_regex(tag: &str) -> Arc<Regex> {
    if let Ok(mut cache) = TAG_REGEX_CACHE.lock()
        && let Some(regex) = cache.get(tag)
    {
        return Arc::clone(regex);
    }

    let compiled = Arc::new(Regex::new(&tag_pattern(tag)).expect("escaped tag pattern compiles"));

    if let Ok(mut cache) = TAG_REGEX_CACHE.lock() {
        cache.put(tag.to_string(), Arc::clone(&compiled));
    }
    compiled
}

/// Trimmed inner text of the first `<tag>…</tag>`, if any
pub fn extract_tag<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    tag_regex(tag)
        .captures(xml)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Untrimmed inner text of every `<tag>…</tag>`, in document order
pub fn extract_blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    tag_regex(tag)
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
