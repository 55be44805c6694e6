//! Joining weather records onto the uploaded rows.

use crate::enrichment::error::EnrichmentError;
use crate::enrichment::fetch::RowWeather;
use crate::frame::columns::*;
use crate::frame::enriched_frame::EnrichedFrame;
use crate::types::dry_thunderstorm::DryThunderstorm;
use crate::upload::input_frame::InputFrame;
use polars::prelude::*;
use std::collections::HashMap;

/// Builds the weather table of an upload: one row per entry of `weather`,
/// already under the display names and with `dry_thunderstorm` derived.
///
/// Rows without a record keep the UTC start of their input day as `time` and
/// an offset of zero, so their local day is still their input date.
fn weather_frame(input: &InputFrame, weather: &[RowWeather]) -> PolarsResult<DataFrame> {
    let day_starts: HashMap<i64, i64> = input
        .queries()
        .iter()
        .map(|query| (query.id, query.utc_day_start()))
        .collect();

    let mut ids = Vec::with_capacity(weather.len());
    let mut times = Vec::with_capacity(weather.len());
    let mut offsets = Vec::with_capacity(weather.len());
    let mut codes = Vec::with_capacity(weather.len());
    let mut temperatures = Vec::with_capacity(weather.len());
    let mut precipitation = Vec::with_capacity(weather.len());
    let mut wind_speeds = Vec::with_capacity(weather.len());
    let mut wind_directions = Vec::with_capacity(weather.len());
    let mut dry = Vec::with_capacity(weather.len());

    for (id, record) in weather {
        ids.push(*id);
        match record {
            Some(record) => {
                times.push(Some(record.time));
                offsets.push(record.utc_offset_seconds);
                codes.push(record.weather_code);
                temperatures.push(record.mean_temperature);
                precipitation.push(record.precipitation_sum);
                wind_speeds.push(record.max_wind_speed);
                wind_directions.push(record.dominant_wind_direction);
                dry.push(record.dry_thunderstorm().as_str());
            }
            None => {
                times.push(day_starts.get(id).copied());
                offsets.push(0);
                codes.push(None);
                temperatures.push(None);
                precipitation.push(None);
                wind_speeds.push(None);
                wind_directions.push(None);
                dry.push(DryThunderstorm::Unknown.as_str());
            }
        }
    }

    DataFrame::new(vec![
        Column::new(ID.into(), ids),
        Column::new(TIME.into(), times),
        Column::new(WEATHER_CODE.into(), codes),
        Column::new(TEMPERATURE.into(), temperatures),
        Column::new(PRECIPITATION.into(), precipitation),
        Column::new(WIND_SPEED.into(), wind_speeds),
        Column::new(WIND_DIRECTION.into(), wind_directions),
        Column::new(DRY_THUNDERSTORM.into(), dry),
        Column::new(UTC_OFFSET.into(), offsets),
    ])
}

/// Merges per-row weather into the uploaded rows.
///
/// Rows are joined on `id` (never on position), sorted by `id`, the `dt`
/// column is dropped and the result is projected onto [`CANONICAL`], followed
/// by the internal [`UTC_OFFSET`] column. The
/// function is pure: the same inputs always give an identical frame.
///
/// # Errors
///
/// Returns [`EnrichmentError::Merge`] if Polars fails to build or join the tables,
/// e.g. when the upload lacks one of the canonical passthrough columns.
pub fn merge_weather(
    input: &InputFrame,
    weather: &[RowWeather],
) -> Result<EnrichedFrame, EnrichmentError> {
    let weather = weather_frame(input, weather).map_err(EnrichmentError::Merge)?;
    let projection: Vec<Expr> = STORED.iter().map(|name| col(*name)).collect();

    let frame = input
        .frame()
        .clone()
        .lazy()
        .join(
            weather.lazy(),
            [col(ID)],
            [col(ID)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([ID], SortMultipleOptions::default())
        .select(projection)
        .collect()
        .map_err(EnrichmentError::Merge)?;

    Ok(EnrichedFrame::new(frame))
}
