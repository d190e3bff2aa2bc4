//! Row sources: the pull-based providers of raw worksheet rows
//!
//! The pipeline only depends on the [`RowSource`] contract. The calamine
//! backed [`WorkbookSource`] is the production implementation; [`VecSource`]
//! feeds rows from memory, which is handy for tests and for running the
//! pipeline over non-spreadsheet data.

use crate::error::{Result, SheetError};
use crate::types::{CellValue, Row};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::path::Path;

/// Pull-based provider of raw rows for one selected sheet
///
/// Sources are designed for exactly one active consumer: the row iterator
/// is single pass and is not restartable. A consumer that stops pulling
/// causes no further rows to be read from the underlying storage.
pub trait RowSource {
    /// Owned iterator over the rows of the currently selected sheet
    type Rows: Iterator<Item = Result<Row>>;

    /// Ordered list of sheet names
    fn sheet_names(&self) -> Vec<String>;

    /// Select a sheet by name, returning whether it exists
    fn select_sheet(&mut self, name: &str) -> bool;

    /// Select a sheet by zero-based index, returning whether it exists
    fn select_sheet_at(&mut self, index: usize) -> bool;

    /// Read the first row of the selected sheet as text values
    fn header_row(&mut self) -> Result<Vec<String>>;

    /// Lazy sequence of rows for the currently selected sheet
    fn rows(&mut self) -> Result<Self::Rows>;
}

/// Workbook-backed row source
///
/// Supports XLSX, XLS, and ODS formats; the format is auto-detected from
/// the file extension. The source owns the underlying file handle and
/// releases it when dropped, on every exit path.
///
/// # Examples
///
/// ```no_run
/// use sheetflow::source::{RowSource, WorkbookSource};
///
/// let mut source = WorkbookSource::open("data.xlsx")?;
/// for row_result in source.rows()? {
///     let row = row_result?;
///     println!("Row {}: {:?}", row.index, row.to_strings());
/// }
/// # Ok::<(), sheetflow::SheetError>(())
/// ```
pub struct WorkbookSource {
    workbook: Sheets<std::io::BufReader<std::fs::File>>,
    selected: Option<String>,
}

impl WorkbookSource {
    /// Open a workbook file, selecting the first sheet if one exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workbook = open_workbook_auto(path).map_err(|e| SheetError::Read(e.to_string()))?;

        let selected = workbook.sheet_names().first().cloned();
        Ok(WorkbookSource { workbook, selected })
    }

    /// Get the number of sheets in the workbook
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_names().len()
    }

    /// Name of the currently selected sheet, if any
    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn selected_range(&mut self) -> Result<Range<Data>> {
        let available = self.workbook.sheet_names().join(", ");

        let sheet = match &self.selected {
            Some(name) => name.clone(),
            None => {
                return Err(SheetError::SheetNotFound {
                    sheet: "<none selected>".to_string(),
                    available,
                })
            }
        };

        self.workbook.worksheet_range(&sheet).map_err(|e| {
            let error_str = e.to_string();
            if error_str.contains("not found") {
                SheetError::SheetNotFound { sheet, available }
            } else {
                SheetError::from(e)
            }
        })
    }
}

impl RowSource for WorkbookSource {
    type Rows = WorkbookRows;

    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn select_sheet(&mut self, name: &str) -> bool {
        if self.workbook.sheet_names().iter().any(|s| s == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }

    fn select_sheet_at(&mut self, index: usize) -> bool {
        match self.workbook.sheet_names().get(index) {
            Some(name) => {
                self.selected = Some(name.clone());
                true
            }
            None => false,
        }
    }

    fn header_row(&mut self) -> Result<Vec<String>> {
        let mut rows = self.rows()?;
        match rows.next() {
            Some(row) => Ok(row?.to_strings()),
            None => Ok(Vec::new()),
        }
    }

    fn rows(&mut self) -> Result<Self::Rows> {
        let range = self.selected_range()?;
        Ok(WorkbookRows::new(range))
    }
}

/// Iterator over rows in a workbook sheet
pub struct WorkbookRows {
    range: Range<Data>,
    current_row: u32,
    max_row: u32,
    start_col: u32,
}

impl WorkbookRows {
    fn new(range: Range<Data>) -> Self {
        let (rows, _) = range.get_size();
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        WorkbookRows {
            range,
            current_row: start_row,
            max_row: start_row + rows as u32,
            start_col,
        }
    }
}

impl Iterator for WorkbookRows {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.max_row {
            return None;
        }

        let row_idx = self.current_row;
        self.current_row += 1;

        let (_, cols) = self.range.get_size();
        let mut cells = Vec::with_capacity(cols);

        // get_value takes absolute coordinates; the range may not be
        // anchored at column A
        for col in 0..cols {
            let cell_value = self
                .range
                .get_value((row_idx, self.start_col + col as u32))
                .map(datatype_to_cellvalue)
                .unwrap_or(CellValue::Empty);

            cells.push(cell_value);
        }

        Some(Ok(Row::new(row_idx, cells)))
    }
}

/// Convert calamine Data to our CellValue
fn datatype_to_cellvalue(dt: &Data) -> CellValue {
    match dt {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(d) => CellValue::DateTime(d.as_f64()),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

/// In-memory row source
///
/// Rows are supplied up front as cell vectors, one list per named sheet.
pub struct VecSource {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
    selected: usize,
}

impl VecSource {
    /// Create a source with a single sheet named "Sheet1"
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        VecSource {
            sheets: vec![("Sheet1".to_string(), rows)],
            selected: 0,
        }
    }

    /// Create a source with multiple named sheets
    pub fn with_sheets(sheets: Vec<(String, Vec<Vec<CellValue>>)>) -> Self {
        VecSource { sheets, selected: 0 }
    }
}

impl RowSource for VecSource {
    type Rows = std::vec::IntoIter<Result<Row>>;

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn select_sheet(&mut self, name: &str) -> bool {
        match self.sheets.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    fn select_sheet_at(&mut self, index: usize) -> bool {
        if index < self.sheets.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    fn header_row(&mut self) -> Result<Vec<String>> {
        let mut rows = self.rows()?;
        match rows.next() {
            Some(row) => Ok(row?.to_strings()),
            None => Ok(Vec::new()),
        }
    }

    fn rows(&mut self) -> Result<Self::Rows> {
        let rows = match self.sheets.get(self.selected) {
            Some((_, rows)) => rows,
            None => {
                return Err(SheetError::SheetNotFound {
                    sheet: format!("index {}", self.selected),
                    available: self.sheet_names().join(", "),
                })
            }
        };

        let rows: Vec<Result<Row>> = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| Ok(Row::new(i as u32, cells.clone())))
            .collect();

        Ok(rows.into_iter())
    }
}
