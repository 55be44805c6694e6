use crate::types::row_query::RowQuery;
use crate::types::weather_record::WeatherRecord;
use crate::weather_archive::error::ArchiveError;
use async_trait::async_trait;

/// Anything that can answer "what was the weather at this point on this day".
///
/// [`crate::ArchiveClient`] is the network implementation; the dashboard only
/// depends on this trait, so other archives or fixtures can be plugged in.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Looks up the daily weather for a single row.
    ///
    /// The returned record must carry `query.id`.
    async fn daily_weather(&self, query: &RowQuery) -> Result<WeatherRecord, ArchiveError>;
}
