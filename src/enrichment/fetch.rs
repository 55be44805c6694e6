//! Concurrent weather lookups for every uploaded row.

use crate::enrichment::error::EnrichmentError;
use crate::types::row_query::RowQuery;
use crate::types::weather_record::WeatherRecord;
use crate::weather_archive::source::WeatherSource;
use futures_util::future::{join_all, try_join_all};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to an upload when some of its weather lookups fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// The first failed lookup fails the whole batch; nothing is kept.
    #[default]
    AbortBatch,
    /// Failed rows are kept with empty weather columns.
    MarkUnavailable,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" | "abort-batch" => Ok(FailurePolicy::AbortBatch),
            "mark-unavailable" | "isolate" => Ok(FailurePolicy::MarkUnavailable),
            other => Err(format!(
                "unknown failure policy '{other}', expected 'abort' or 'mark-unavailable'"
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::AbortBatch => f.write_str("abort"),
            FailurePolicy::MarkUnavailable => f.write_str("mark-unavailable"),
        }
    }
}

/// The weather of one row, `None` when its lookup failed under
/// [`FailurePolicy::MarkUnavailable`].
pub type RowWeather = (i64, Option<WeatherRecord>);

/// Looks up the weather of every query concurrently.
///
/// All lookups are started at once and awaited together; there is no bound on
/// the number of requests in flight, no retry and no timeout beyond the
/// source's own. The result is in the order of `queries`, each entry tagged
/// with its row id, whatever order the lookups complete in.
///
/// # Errors
///
/// With [`FailurePolicy::AbortBatch`], returns [`EnrichmentError::Lookup`] for
/// the first failing row. With [`FailurePolicy::MarkUnavailable`] this function
/// does not fail.
pub async fn fetch_weather<S>(
    weather: &S,
    queries: &[RowQuery],
    policy: FailurePolicy,
) -> Result<Vec<RowWeather>, EnrichmentError>
where
    S: WeatherSource + ?Sized,
{
    info!(
        "Requesting archive weather for {} rows ({})",
        queries.len(),
        policy
    );

    match policy {
        FailurePolicy::AbortBatch => {
            try_join_all(queries.iter().map(|query| async move {
                weather
                    .daily_weather(query)
                    .await
                    .map(|record| (query.id, Some(record)))
                    .map_err(|source| EnrichmentError::Lookup {
                        id: query.id,
                        source,
                    })
            }))
            .await
        }
        FailurePolicy::MarkUnavailable => {
            let results = join_all(
                queries
                    .iter()
                    .map(|query| async move { (query.id, weather.daily_weather(query).await) }),
            )
            .await;

            Ok(results
                .into_iter()
                .map(|(id, result)| match result {
                    Ok(record) => (id, Some(record)),
                    Err(e) => {
                        warn!("Weather unavailable for row {}: {}", id, e);
                        (id, None)
                    }
                })
                .collect())
        }
    }
}
