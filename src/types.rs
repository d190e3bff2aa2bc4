//! Type definitions for raw rows and cell values

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;

/// Represents a single cell value in a worksheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// DateTime value (Excel serial date number)
    DateTime(f64),
    /// Error value
    Error(String),
    /// Formula value (e.g., "=SUM(A1:A10)")
    Formula(String),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(d) => d.to_string(),
            CellValue::Error(e) => format!("ERROR: {}", e),
            CellValue::Formula(f) => f.clone(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => Some(*f as i64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::DateTime(d) => Some(*d),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Int(i) => Some(*i != 0),
            CellValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Conversion from a raw cell value to a typed value
///
/// Implemented for the scalar types cells commonly hold. `Row::get_as`
/// uses this as the single typed accessor, so callers never touch the
/// underlying `CellValue` variants unless they want to.
pub trait FromCell: Sized {
    /// Try to extract `Self` from a cell value, `None` if not representable
    fn from_cell(value: &CellValue) -> Option<Self>;

    /// Type name used in error messages
    fn type_name() -> &'static str;
}

impl FromCell for String {
    fn from_cell(value: &CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => None,
            other => Some(other.as_string()),
        }
    }

    fn type_name() -> &'static str {
        "string"
    }
}

impl FromCell for i64 {
    fn from_cell(value: &CellValue) -> Option<Self> {
        value.as_i64()
    }

    fn type_name() -> &'static str {
        "integer"
    }
}

impl FromCell for f64 {
    fn from_cell(value: &CellValue) -> Option<Self> {
        value.as_f64()
    }

    fn type_name() -> &'static str {
        "float"
    }
}

impl FromCell for bool {
    fn from_cell(value: &CellValue) -> Option<Self> {
        value.as_bool()
    }

    fn type_name() -> &'static str {
        "boolean"
    }
}

impl FromCell for NaiveDateTime {
    fn from_cell(value: &CellValue) -> Option<Self> {
        let serial = match value {
            CellValue::DateTime(d) => *d,
            CellValue::Float(f) => *f,
            CellValue::Int(i) => *i as f64,
            _ => return None,
        };

        // Excel serial dates count days from 1899-12-30
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        let seconds = (serial * 86_400.0).round() as i64;
        epoch.checked_add_signed(Duration::seconds(seconds))
    }

    fn type_name() -> &'static str {
        "datetime"
    }
}

/// A raw row produced by a row source
///
/// Rows are owned snapshots: cell values are copied out of the engine's
/// storage, so a row stays valid after the source advances past it.
#[derive(Debug, Clone)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(index: u32, cells: Vec<CellValue>) -> Self {
        Row { index, cells }
    }

    /// Get cell at column index
    pub fn get(&self, col: usize) -> Option<&CellValue> {
        self.cells.get(col)
    }

    /// Get cell at column index converted to a typed value
    ///
    /// Returns `None` if the column is absent or the value cannot be
    /// represented as `T`.
    pub fn get_as<T: FromCell>(&self, col: usize) -> Option<T> {
        self.get(col).and_then(T::from_cell)
    }

    /// Check whether the cell at column index is absent or empty
    pub fn is_null(&self, col: usize) -> bool {
        matches!(self.get(col), None | Some(CellValue::Empty))
    }

    /// Get number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cells.iter().all(|c| c.is_empty())
    }

    /// Convert row to vector of strings
    pub fn to_strings(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.as_string()).collect()
    }
}
