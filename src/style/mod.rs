//! Cell styling: formatting descriptors, the per-document style cache,
//! and the cell-level resolver
//!
//! Documents impose a hard cap on the number of distinct formatting
//! objects, so naive per-cell style creation both exhausts the cap and
//! bloats files. [`StyleCache`] deduplicates styles by a caller-chosen
//! key, creating each distinct style at most once per document;
//! [`StyleResolver`] bridges cell-level requests to the cache.

mod cache;
mod resolver;

pub use cache::StyleCache;
pub use resolver::{CellContext, CellTarget, StyleResolver};

use std::ops::Deref;
use std::sync::Arc;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);

    /// Create a color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// ARGB hex representation used by spreadsheet style tables
    pub fn to_argb_hex(&self) -> String {
        format!("FF{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlign {
    /// Engine default (text left, numbers right)
    #[default]
    General,
    Left,
    Center,
    Right,
}

/// A formatting descriptor applied to a cell
///
/// Styles are configured in place while being built and become immutable
/// once cached: every cell referencing the same key shares one object, so
/// callers must not mutate a style after handing it to the cache. Default
/// is the engine's default formatting.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Font name, engine default when absent
    pub font_name: Option<String>,
    /// Font size in points, engine default when absent
    pub font_size: Option<f64>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Solid background fill
    pub fill_color: Option<Color>,
    /// Number format string (e.g., "#,##0.00")
    pub number_format: Option<String>,
    /// Thin borders on all sides
    pub border_thin: bool,
    /// Horizontal alignment
    pub align: HorizontalAlign,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set solid fill color
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Enable thin borders on all sides
    pub fn border_thin(mut self, thin: bool) -> Self {
        self.border_thin = thin;
        self
    }

    /// Set horizontal alignment
    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }
}

/// Opaque handle to a formatting object owned by the document
///
/// Handles are cheap to clone and share one immutable [`Style`]. Two
/// handles obtained from the cache under the same key refer to the same
/// object; [`StyleHandle::same`] observes that identity.
#[derive(Debug, Clone)]
pub struct StyleHandle(Arc<Style>);

impl StyleHandle {
    pub(crate) fn new(style: Style) -> Self {
        StyleHandle(Arc::new(style))
    }

    /// Whether two handles refer to the same formatting object
    pub fn same(a: &StyleHandle, b: &StyleHandle) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for StyleHandle {
    type Target = Style;

    fn deref(&self) -> &Style {
        &self.0
    }
}
