//! Lazy row pipeline: skip, filter, and map raw rows into typed records
//!
//! A [`Pipeline`] composes a [`RowSource`] and a [`RowMapper`] with deferred
//! skip and filter stages. Nothing is read from the source until the
//! consumer pulls from the iterator returned by [`Pipeline::records`], and
//! only one row is in flight at a time.
//!
//! Configuration is frozen when iteration begins: the terminal operations
//! consume the builder, so reconfiguring a running pipeline is a compile
//! error rather than silent inconsistent behavior.
//!
//! # Examples
//!
//! ```
//! use sheetflow::pipeline::Pipeline;
//! use sheetflow::source::VecSource;
//! use sheetflow::types::{CellValue, Row};
//!
//! let source = VecSource::new(vec![
//!     vec![CellValue::from("Name"), CellValue::from("Age")],
//!     vec![CellValue::from("Alice"), CellValue::from("30")],
//!     vec![CellValue::from("Bob"), CellValue::from("25")],
//! ]);
//!
//! let pairs = Pipeline::new(source, |row: &Row| {
//!     Ok((row.get_as::<String>(0).unwrap_or_default(),
//!         row.get_as::<String>(1).unwrap_or_default()))
//! })
//! .skip_header()
//! .collect_records()?;
//!
//! assert_eq!(pairs[0].0, "Alice");
//! # Ok::<(), sheetflow::SheetError>(())
//! ```

use crate::error::Result;
use crate::source::RowSource;
use crate::types::Row;

/// Converts one raw row into one typed record
///
/// Mappers are expected to be pure functions of their input row: the
/// pipeline invokes the mapper exactly once per surviving row, in source
/// order, and does not enforce purity. Any closure
/// `FnMut(&Row) -> Result<T>` is a mapper.
pub trait RowMapper {
    /// The typed record produced per row
    type Output;

    /// Map one row to one record
    fn map_row(&mut self, row: &Row) -> Result<Self::Output>;
}

impl<F, T> RowMapper for F
where
    F: FnMut(&Row) -> Result<T>,
{
    type Output = T;

    fn map_row(&mut self, row: &Row) -> Result<T> {
        self(row)
    }
}

/// Builder for a lazy row-to-record pipeline
///
/// Stages apply strictly skip → filter → map, in row-source order, with no
/// reordering or buffering beyond a single row. The skip count applies to
/// rows actually observed from the source, not to row index values, so it
/// is robust to sparse sources.
pub struct Pipeline<S, M> {
    source: S,
    mapper: M,
    skip: usize,
    filter: Option<Box<dyn FnMut(&Row) -> bool>>,
}

impl<S, M> Pipeline<S, M>
where
    S: RowSource,
    M: RowMapper,
{
    /// Create a pipeline over a source and a mapper
    pub fn new(source: S, mapper: M) -> Self {
        Pipeline {
            source,
            mapper,
            skip: 0,
            filter: None,
        }
    }

    /// Drop the first `n` rows observed from the source
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Drop the first row; shorthand for `skip(1)`
    pub fn skip_header(self) -> Self {
        self.skip(1)
    }

    /// Keep only rows for which the predicate returns true
    ///
    /// Rows failing the predicate are dropped without reaching the mapper.
    /// The default accepts every row.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&Row) -> bool + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Start iteration, producing the lazy record sequence
    ///
    /// Consumes the builder, freezing its configuration. The returned
    /// iterator is single pass: once exhausted it yields nothing further,
    /// and after an error surfaces no more rows are produced.
    pub fn records(mut self) -> Result<Records<S::Rows, M>> {
        let rows = self.source.rows()?;
        Ok(Records {
            rows,
            mapper: self.mapper,
            remaining_skip: self.skip,
            filter: self.filter,
            done: false,
        })
    }

    /// Materialize every record eagerly into a vector
    ///
    /// Convenience terminal; drives the lazy sequence to completion and
    /// stops at the first error.
    pub fn collect_records(self) -> Result<Vec<M::Output>> {
        self.records()?.collect()
    }
}

/// Lazy iterator over typed records
///
/// Produced by [`Pipeline::records`]. Each pull reads at most one
/// surviving row from the source; a consumer that stops pulling causes no
/// further reads.
pub struct Records<R, M> {
    rows: R,
    mapper: M,
    remaining_skip: usize,
    filter: Option<Box<dyn FnMut(&Row) -> bool>>,
    done: bool,
}

impl<R, M> Iterator for Records<R, M>
where
    R: Iterator<Item = Result<Row>>,
    M: RowMapper,
{
    type Item = Result<M::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let row = match self.rows.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(row)) => row,
            };

            if self.remaining_skip > 0 {
                self.remaining_skip -= 1;
                continue;
            }

            if let Some(predicate) = self.filter.as_mut() {
                if !predicate(&row) {
                    continue;
                }
            }

            return match self.mapper.map_row(&row) {
                Ok(record) => Some(Ok(record)),
                Err(e) => {
                    self.done = true;
                    Some(Err(e))
                }
            };
        }
    }
}
