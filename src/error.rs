//! Error types for the sheetflow library

use thiserror::Error;

/// Result type alias for sheetflow operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Main error type for all sheetflow operations
///
/// The library performs no logging, swallowing, or retries: errors from the
/// underlying engine and from user callbacks are relayed unchanged to the
/// code that is actively pulling rows or resolving styles.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Error occurred while reading from the workbook engine
    #[error("Failed to read workbook: {0}")]
    Read(String),

    /// Invalid sheet name or sheet not found
    #[error("Sheet '{sheet}' not found. Available sheets: {available}")]
    SheetNotFound { sheet: String, available: String },

    /// A cell value could not be converted to the requested type
    #[error("Cell ({row}, {col}) cannot be read as {expected}")]
    InvalidType {
        row: u32,
        col: u32,
        expected: &'static str,
    },

    /// A caller-supplied mapper, filter, or style configuration failed
    #[error("Callback failed: {0}")]
    Callback(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Calamine error wrapper
    #[error("Calamine error: {0}")]
    Calamine(String),
}

impl SheetError {
    /// Convenience constructor for user callback failures
    pub fn callback<S: Into<String>>(msg: S) -> Self {
        SheetError::Callback(msg.into())
    }
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::Calamine(err.to_string())
    }
}

impl From<calamine::XlsxError> for SheetError {
    fn from(err: calamine::XlsxError) -> Self {
        SheetError::Calamine(err.to_string())
    }
}

impl From<calamine::XlsError> for SheetError {
    fn from(err: calamine::XlsError) -> Self {
        SheetError::Calamine(err.to_string())
    }
}
