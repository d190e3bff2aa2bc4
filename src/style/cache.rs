//! Key-based style deduplication

use super::{Style, StyleHandle};
use crate::error::Result;
use indexmap::IndexMap;

/// Per-document style cache keyed by caller-chosen strings
///
/// Guarantees at most one formatting object per key for the cache's entire
/// lifetime: once a key is present it is never overwritten, so the first
/// writer wins. The cache is scoped to exactly one document-building
/// session and is not synchronized for concurrent mutation.
///
/// A `None` key disables caching for that call: the builder runs and its
/// result is returned fresh, never stored and never reused. `Some("")` is
/// an ordinary key, not a sentinel.
#[derive(Debug, Default)]
pub struct StyleCache {
    styles: IndexMap<String, StyleHandle>,
}

impl StyleCache {
    /// Create an empty cache
    pub fn new() -> Self {
        StyleCache {
            styles: IndexMap::new(),
        }
    }

    /// Get the cached style for `key` if present. No side effects.
    pub fn get(&self, key: &str) -> Option<StyleHandle> {
        self.styles.get(key).cloned()
    }

    /// Return the style cached under `key`, building it on first use
    ///
    /// If `key` is present the existing handle is returned and `builder`
    /// is never invoked. If absent, `builder` runs exactly once and the
    /// result is stored under `key`. With a `None` key the built style is
    /// returned without being stored.
    ///
    /// A builder error propagates unchanged and leaves the cache untouched
    /// for that key. The builder must not itself use this cache.
    pub fn get_or_insert<F>(&mut self, key: Option<&str>, builder: F) -> Result<StyleHandle>
    where
        F: FnOnce() -> Result<Style>,
    {
        let key = match key {
            Some(key) => key,
            None => return Ok(StyleHandle::new(builder()?)),
        };

        if let Some(existing) = self.styles.get(key) {
            return Ok(existing.clone());
        }

        let handle = StyleHandle::new(builder()?);
        self.styles.insert(key.to_string(), handle.clone());
        Ok(handle)
    }

    /// Number of cached styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the cache holds no styles
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over cached keys in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}
