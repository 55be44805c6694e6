use crate::types::weather_record::WeatherRecord;
use crate::weather_archive::error::ArchiveError;
use serde::Deserialize;

/// Body of an archive response; only the `daily` block and the point's UTC
/// offset are used.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    #[serde(default)]
    pub utc_offset_seconds: i64,
    pub daily: ArchiveDaily,
}

/// One array per requested daily field. With a single-day range every array
/// holds exactly one element.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveDaily {
    pub time: Vec<i64>,
    pub weathercode: Vec<Option<i64>>,
    pub temperature_2m_mean: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub windspeed_10m_max: Vec<Option<f64>>,
    pub winddirection_10m_dominant: Vec<Option<f64>>,
}

impl ArchiveDaily {
    /// Takes element 0 of every field.
    pub fn into_record(
        self,
        id: i64,
        utc_offset_seconds: i64,
    ) -> Result<WeatherRecord, ArchiveError> {
        Ok(WeatherRecord {
            id,
            utc_offset_seconds,
            time: *self
                .time
                .first()
                .ok_or(ArchiveError::MissingDailyValue { id, field: "time" })?,
            weather_code: first(&self.weathercode, id, "weathercode")?,
            mean_temperature: first(&self.temperature_2m_mean, id, "temperature_2m_mean")?,
            precipitation_sum: first(&self.precipitation_sum, id, "precipitation_sum")?,
            max_wind_speed: first(&self.windspeed_10m_max, id, "windspeed_10m_max")?,
            dominant_wind_direction: first(
                &self.winddirection_10m_dominant,
                id,
                "winddirection_10m_dominant",
            )?,
        })
    }
}

fn first<T: Copy>(
    values: &[Option<T>],
    id: i64,
    field: &'static str,
) -> Result<Option<T>, ArchiveError> {
    values
        .first()
        .copied()
        .ok_or(ArchiveError::MissingDailyValue { id, field })
}

/// Parses a raw archive response body into the weather record of row `id`.
pub(crate) fn parse_response(
    body: &[u8],
    url: &str,
    id: i64,
) -> Result<WeatherRecord, ArchiveError> {
    let response: ArchiveResponse =
        serde_json::from_slice(body).map_err(|e| ArchiveError::JsonParse {
            url: url.to_string(),
            source: e,
        })?;
    response.daily.into_record(id, response.utc_offset_seconds)
}
