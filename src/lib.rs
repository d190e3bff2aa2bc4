//! # sheetflow
//!
//! A layer between application code and a spreadsheet document engine,
//! for generating and consuming large workbooks.
//!
//! ## Features
//!
//! - **Style Cache**: deduplicate formatting objects by key, creating each
//!   distinct style at most once per document — documents cap the number
//!   of styles they may contain, and per-cell creation exhausts the cap
//! - **Streaming Row Pipeline**: lazy, composable skip / filter / map over
//!   a pull-based row reader, one row in flight at a time
//! - **Typed Records**: map raw rows to your own types through a single
//!   generic accessor
//! - **Multiple Formats**: the workbook source auto-detects XLSX, XLS, ODS
//! - **Faithful Errors**: no logging, no retries — collaborator errors are
//!   relayed unchanged to the pulling consumer
//!
//! ## Quick Start
//!
//! ### Reading rows through a pipeline
//!
//! ```rust,no_run
//! use sheetflow::pipeline::Pipeline;
//! use sheetflow::source::WorkbookSource;
//! use sheetflow::types::Row;
//!
//! # fn main() -> Result<(), sheetflow::SheetError> {
//! let source = WorkbookSource::open("people.xlsx")?;
//!
//! let people = Pipeline::new(source, |row: &Row| {
//!     Ok((
//!         row.get_as::<String>(0).unwrap_or_default(),
//!         row.get_as::<i64>(1).unwrap_or_default(),
//!     ))
//! })
//! .skip_header()
//! .filter(|row: &Row| !row.is_null(0))
//! .records()?;
//!
//! for person in people {
//!     let (name, age) = person?;
//!     println!("{name} is {age}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Deduplicating styles while writing
//!
//! ```rust
//! use sheetflow::style::{Color, StyleCache};
//!
//! # fn main() -> Result<(), sheetflow::SheetError> {
//! let mut cache = StyleCache::new();
//!
//! // built once, reused for every header cell in the document
//! for _ in 0..1_000 {
//!     let style = cache.get_or_insert(Some("header"), || {
//!         Ok(sheetflow::style::Style::new()
//!             .bold(true)
//!             .fill_color(Color::YELLOW))
//!     })?;
//!     assert!(style.bold);
//! }
//! assert_eq!(cache.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pipeline;
pub mod source;
pub mod style;
pub mod types;

pub use error::{Result, SheetError};
pub use pipeline::{Pipeline, Records, RowMapper};
pub use source::{RowSource, VecSource, WorkbookSource};
pub use style::{CellContext, CellTarget, Style, StyleCache, StyleHandle, StyleResolver};
pub use types::{CellValue, FromCell, Row};
