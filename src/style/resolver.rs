//! Bridges cell-level style requests to the per-document cache

use super::{Style, StyleCache, StyleHandle};
use crate::error::Result;
use crate::types::CellValue;

/// Context handed to a style configuration function
///
/// One generic record type covers both typed and untyped callers; when the
/// record is a raw [`crate::types::Row`], untyped access goes through
/// [`crate::types::Row::get_as`].
#[derive(Debug)]
pub struct CellContext<'a, T> {
    /// Name of the sheet being written
    pub sheet: &'a str,
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based)
    pub col: u32,
    /// The record the cell is rendered from
    pub record: &'a T,
}

/// Per-cell mutable handle the resolved style and content are applied to
///
/// Implemented by the document engine; the resolver does not interpret its
/// internals.
pub trait CellTarget {
    /// Apply a resolved style to the cell
    fn apply_style(&mut self, style: &StyleHandle);

    /// Set the cell's value
    fn set_value(&mut self, value: CellValue);

    /// Set the cell's formula (Excel syntax, leading '=')
    fn set_formula(&mut self, formula: &str);
}

/// Resolves cell-level style requests against a [`StyleCache`]
///
/// Owned by exactly one document-building session, like the cache it
/// wraps. Two request shapes exist: by already-cached key
/// ([`apply_named`](StyleResolver::apply_named)) and by configuration
/// function ([`apply_configured`](StyleResolver::apply_configured)).
#[derive(Debug, Default)]
pub struct StyleResolver {
    cache: StyleCache,
}

impl StyleResolver {
    /// Create a resolver with an empty cache
    pub fn new() -> Self {
        StyleResolver {
            cache: StyleCache::new(),
        }
    }

    /// Apply the style already cached under `key`
    ///
    /// If the key was never cached nothing is applied and no error is
    /// raised; callers may conditionally reference styles that were never
    /// registered. Returns whether a style was applied.
    pub fn apply_named(&self, key: &str, target: &mut dyn CellTarget) -> bool {
        match self.cache.get(key) {
            Some(handle) => {
                target.apply_style(&handle);
                true
            }
            None => false,
        }
    }

    /// Configure a fresh style for a cell and apply the cached instance
    ///
    /// A new [`Style`] is always allocated and handed to `configure`,
    /// which mutates it in place and returns the key to cache it under
    /// (`None` to skip caching). If the returned key is already cached the
    /// newly configured style is discarded and the pre-existing instance
    /// applied instead: the cache is authoritative, first writer wins,
    /// even when the caller's configuration logic is not idempotent-aware.
    ///
    /// A `configure` error propagates unchanged; nothing is cached and no
    /// style is applied.
    pub fn apply_configured<T, F>(
        &mut self,
        ctx: &CellContext<'_, T>,
        target: &mut dyn CellTarget,
        configure: F,
    ) -> Result<()>
    where
        F: FnOnce(&CellContext<'_, T>, &mut Style) -> Result<Option<String>>,
    {
        let mut style = Style::new();
        let key = configure(ctx, &mut style)?;

        let handle = match key {
            Some(key) => self.cache.get_or_insert(Some(&key), || Ok(style))?,
            None => StyleHandle::new(style),
        };

        target.apply_style(&handle);
        Ok(())
    }

    /// The underlying cache
    pub fn cache(&self) -> &StyleCache {
        &self.cache
    }

    /// Consume the resolver, returning its cache
    pub fn into_cache(self) -> StyleCache {
        self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::style::Color;

    /// Test double recording what was applied to the cell
    #[derive(Default)]
    struct RecordingCell {
        styles: Vec<StyleHandle>,
        values: Vec<CellValue>,
        formulas: Vec<String>,
    }

    impl CellTarget for RecordingCell {
        fn apply_style(&mut self, style: &StyleHandle) {
            self.styles.push(style.clone());
        }

        fn set_value(&mut self, value: CellValue) {
            self.values.push(value);
        }

        fn set_formula(&mut self, formula: &str) {
            self.formulas.push(formula.to_string());
        }
    }

    fn ctx<'a>(record: &'a u32) -> CellContext<'a, u32> {
        CellContext {
            sheet: "Sheet1",
            row: 0,
            col: 0,
            record,
        }
    }

    #[test]
    fn test_apply_named_miss_is_silent() {
        let resolver = StyleResolver::new();
        let mut cell = RecordingCell::default();

        assert!(!resolver.apply_named("never-registered", &mut cell));
        assert!(cell.styles.is_empty());
    }

    #[test]
    fn test_apply_configured_caches_and_reuses() {
        let mut resolver = StyleResolver::new();
        let record = 7u32;

        let mut first = RecordingCell::default();
        resolver
            .apply_configured(&ctx(&record), &mut first, |_, style| {
                style.bold = true;
                style.fill_color = Some(Color::YELLOW);
                Ok(Some("highlight".to_string()))
            })
            .unwrap();

        // second cell configures differently under the same key; the
        // freshly configured style is discarded, the cached one applied
        let mut second = RecordingCell::default();
        resolver
            .apply_configured(&ctx(&record), &mut second, |_, style| {
                style.italic = true;
                Ok(Some("highlight".to_string()))
            })
            .unwrap();

        assert_eq!(resolver.cache().len(), 1);
        assert!(StyleHandle::same(&first.styles[0], &second.styles[0]));
        assert!(second.styles[0].bold);
        assert!(!second.styles[0].italic);

        // and the key is now resolvable by name
        let mut third = RecordingCell::default();
        assert!(resolver.apply_named("highlight", &mut third));
        assert!(StyleHandle::same(&first.styles[0], &third.styles[0]));
    }

    #[test]
    fn test_apply_configured_uncached() {
        let mut resolver = StyleResolver::new();
        let record = 1u32;

        let mut a = RecordingCell::default();
        let mut b = RecordingCell::default();
        for cell in [&mut a, &mut b] {
            resolver
                .apply_configured(&ctx(&record), cell, |_, style| {
                    style.italic = true;
                    Ok(None)
                })
                .unwrap();
        }

        assert!(resolver.cache().is_empty());
        assert!(!StyleHandle::same(&a.styles[0], &b.styles[0]));
    }

    #[test]
    fn test_configure_error_applies_nothing() {
        let mut resolver = StyleResolver::new();
        let record = 1u32;
        let mut cell = RecordingCell::default();

        let result = resolver.apply_configured(&ctx(&record), &mut cell, |_, style| {
            style.bold = true;
            Err(SheetError::callback("bad config"))
        });

        assert!(result.is_err());
        assert!(cell.styles.is_empty());
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_context_fields_reach_configure() {
        let mut resolver = StyleResolver::new();
        let record = 42u32;
        let mut cell = RecordingCell::default();

        let ctx = CellContext {
            sheet: "Data",
            row: 3,
            col: 1,
            record: &record,
        };

        resolver
            .apply_configured(&ctx, &mut cell, |ctx, style| {
                assert_eq!(ctx.sheet, "Data");
                assert_eq!((ctx.row, ctx.col), (3, 1));
                if *ctx.record > 10 {
                    style.fill_color = Some(Color::GREEN);
                }
                Ok(Some(format!("{}-big", ctx.sheet)))
            })
            .unwrap();

        assert_eq!(cell.styles[0].fill_color, Some(Color::GREEN));
        assert!(resolver.cache().get("Data-big").is_some());
    }
}
