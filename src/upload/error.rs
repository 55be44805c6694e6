use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported upload '{0}': expected a .csv or spreadsheet file")]
    UnsupportedFormat(String),

    #[error("Uploaded CSV is not valid UTF-8")]
    Encoding(#[source] std::str::Utf8Error),

    #[error("Failed to read uploaded CSV")]
    Csv(#[source] PolarsError),

    #[error("Failed to read uploaded spreadsheet")]
    Spreadsheet(#[source] calamine::Error),

    #[error("Uploaded spreadsheet has no sheets")]
    NoSheets,

    #[error("Uploaded table has no rows")]
    Empty,

    #[error("Uploaded table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Invalid value in column '{column}' at row {row}")]
    InvalidValue { column: &'static str, row: usize },

    #[error("Failed processing uploaded table: {0}")]
    Table(#[from] PolarsError),
}
