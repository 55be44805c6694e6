use crate::weather_archive::error::ArchiveError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Weather lookup failed for row {id}")]
    Lookup {
        id: i64,
        #[source]
        source: ArchiveError,
    },

    #[error("Failed to merge weather data into the uploaded table")]
    Merge(#[source] PolarsError),
}
