use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Required column '{0}' not found in the enriched table")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing the enriched table: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
