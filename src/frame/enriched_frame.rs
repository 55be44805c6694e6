//! Contains the `EnrichedFrame` structure holding one enriched dataset.

use crate::filtering::DashboardFrameFilterExt;
use crate::frame::columns::*;
use crate::frame::error::DatasetError;
use crate::types::enriched_row::{EnrichedRow, MapPoint};
use crate::types::filter_params::FilterParams;
use crate::types::zone_option::{ZoneOption, ZoneOptions};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// One page of the table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub rows: Vec<EnrichedRow>,
}

/// A wrapper around a Polars `DataFrame` holding enriched rows in canonical
/// column order (see [`CANONICAL`]), followed by the internal [`UTC_OFFSET`]
/// column that date filters use.
///
/// An `EnrichedFrame` is never modified in place: filtering returns a new
/// frame, so a session's raw dataset stays intact while its filtered view is
/// replaced.
///
/// Instances are produced by [`crate::merge_weather`] or by
/// [`EnrichedFrame::filter`].
#[derive(Debug, Clone)]
pub struct EnrichedFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl EnrichedFrame {
    /// Creates a new `EnrichedFrame` wrapping the given `DataFrame`.
    ///
    /// # Arguments
    ///
    /// * `frame` - A `DataFrame` assumed to contain the canonical enriched columns.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Filters the rows with every supplied parameter of `params`.
    ///
    /// The result is always derived from `self`; applying two different
    /// parameter sets one after the other to the same raw frame never compounds.
    ///
    /// # Arguments
    ///
    /// * `params` - The filter parameters. Unset parameters impose no constraint.
    ///
    /// # Returns
    ///
    /// A new `EnrichedFrame` with the matching rows. With empty parameters the
    /// frame is returned unchanged.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use forest_weather::{EnrichedFrame, FilterParams, DatasetError};
    /// # fn run(raw: &EnrichedFrame) -> Result<(), DatasetError> {
    /// let params = FilterParams::builder().zone1("A").build();
    /// let filtered = raw.filter(&params)?;
    /// assert!(filtered.height() <= raw.height());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DataFrameProcessing`] if Polars fails to evaluate the filter.
    pub fn filter(&self, params: &FilterParams) -> Result<EnrichedFrame, DatasetError> {
        if params.is_empty() {
            return Ok(self.clone());
        }
        let frame = self.frame.clone().lazy().filter_params(params).collect()?;
        Ok(EnrichedFrame::new(frame))
    }

    /// Lists the distinct `zone1` and `zone2` values, in order of first appearance.
    pub fn zone_options(&self) -> Result<ZoneOptions, DatasetError> {
        Ok(ZoneOptions {
            zone1: self.distinct(ZONE1)?,
            zone2: self.distinct(ZONE2)?,
        })
    }

    fn distinct(&self, column: &str) -> Result<Vec<ZoneOption>, DatasetError> {
        let values = self.text_column(column)?;
        let mut seen = HashSet::new();
        Ok(values
            .into_iter()
            .flatten()
            .filter(|value| seen.insert(value.clone()))
            .map(ZoneOption::new)
            .collect())
    }

    /// Writes the canonical columns as CSV with a header row. An empty frame
    /// produces the header only.
    pub fn to_csv(&self) -> Result<Vec<u8>, DatasetError> {
        let mut buffer = Vec::new();
        let mut frame = self.frame.select(CANONICAL)?;
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(buffer)
    }

    /// Collects every row into [`EnrichedRow`]s.
    pub fn rows(&self) -> Result<Vec<EnrichedRow>, DatasetError> {
        collect_rows(&self.frame)
    }

    /// Returns page `page` (zero-based) of `page_size` rows. Pages past the
    /// end are empty.
    pub fn page(&self, page: usize, page_size: usize) -> Result<TablePage, DatasetError> {
        if page_size == 0 {
            return Err(DatasetError::ZeroPageSize);
        }
        let offset = page.saturating_mul(page_size);
        let rows = if offset >= self.height() {
            Vec::new()
        } else {
            collect_rows(&self.frame.slice(offset as i64, page_size))?
        };
        Ok(TablePage {
            page,
            page_size,
            total_rows: self.height(),
            rows,
        })
    }

    /// Projects the rows onto map points.
    pub fn map_points(&self) -> Result<Vec<MapPoint>, DatasetError> {
        Ok(self.rows()?.iter().map(MapPoint::from).collect())
    }

    fn text_column(&self, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
        text_values(&self.frame, name)
    }
}

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, DatasetError> {
    frame
        .column(name)
        .map_err(|e| DatasetError::ColumnNotFound(name.to_string(), e))
}

fn text_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
    let values = column(frame, name)?.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_owned))
        .collect())
}

fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
    let values = column(frame, name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

fn int_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, DatasetError> {
    let values = column(frame, name)?.cast(&DataType::Int64)?;
    Ok(values.i64()?.into_iter().collect())
}

fn collect_rows(frame: &DataFrame) -> Result<Vec<EnrichedRow>, DatasetError> {
    let ids = int_values(frame, ID)?;
    let type_names = text_values(frame, TYPE_NAME)?;
    let type_ids = text_values(frame, TYPE_ID)?;
    let lats = float_values(frame, LAT)?;
    let lons = float_values(frame, LON)?;
    let zone1 = text_values(frame, ZONE1)?;
    let zone2 = text_values(frame, ZONE2)?;
    let times = int_values(frame, TIME)?;
    let codes = int_values(frame, WEATHER_CODE)?;
    let temperatures = float_values(frame, TEMPERATURE)?;
    let precipitation = float_values(frame, PRECIPITATION)?;
    let wind_speeds = float_values(frame, WIND_SPEED)?;
    let wind_directions = float_values(frame, WIND_DIRECTION)?;
    let dry = text_values(frame, DRY_THUNDERSTORM)?;

    Ok((0..frame.height())
        .map(|i| EnrichedRow {
            id: ids[i].unwrap_or_default(),
            type_name: type_names[i].clone(),
            type_id: type_ids[i].clone(),
            lat: lats[i].unwrap_or(f64::NAN),
            lon: lons[i].unwrap_or(f64::NAN),
            zone1: zone1[i].clone(),
            zone2: zone2[i].clone(),
            time: times[i].unwrap_or_default(),
            weather_code: codes[i],
            temperature: temperatures[i],
            precipitation: precipitation[i],
            wind_speed: wind_speeds[i],
            wind_direction: wind_directions[i],
            dry_thunderstorm: dry[i].clone().unwrap_or_else(|| "unknown".to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_frame;
    use chrono::NaiveDate;

    fn ids(frame: &EnrichedFrame) -> Vec<i64> {
        frame.rows().unwrap().iter().map(|row| row.id).collect()
    }

    #[test]
    fn test_filter_without_params_returns_everything() {
        let raw = sample_frame();
        let filtered = raw.filter(&FilterParams::default()).unwrap();
        assert!(filtered.frame.equals_missing(&raw.frame));
    }

    #[test]
    fn test_filter_is_a_conjunction() {
        let raw = sample_frame();
        let params = FilterParams::builder()
            .start_date(NaiveDate::from_ymd_opt(2021, 6, 2).unwrap())
            .zone1("B")
            .zone2("South")
            .build();
        assert_eq!(ids(&raw.filter(&params).unwrap()), vec![1]);

        let by_zone = FilterParams::builder().zone1("A").build();
        assert_eq!(ids(&raw.filter(&by_zone).unwrap()), vec![0, 2]);
    }

    #[test]
    fn test_filter_end_date_includes_the_whole_day() {
        let raw = sample_frame();
        let params = FilterParams::builder()
            .end_date(NaiveDate::from_ymd_opt(2021, 6, 2).unwrap())
            .build();
        assert_eq!(ids(&raw.filter(&params).unwrap()), vec![0, 1]);
    }

    #[test]
    fn test_filter_with_absent_zone_is_empty() {
        let raw = sample_frame();
        let params = FilterParams::builder().zone1("Z").build();
        let filtered = raw.filter(&params).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.frame.get_column_names().len(), STORED.len());
    }

    #[test]
    fn test_filters_do_not_compound() {
        let raw = sample_frame();
        let first = FilterParams::builder().zone1("B").build();
        let second = FilterParams::builder().zone1("A").build();

        let _ = raw.filter(&first).unwrap();
        let again = raw.filter(&second).unwrap();
        assert_eq!(ids(&again), vec![0, 2]);
    }

    #[test]
    fn test_filtered_rows_are_raw_rows() {
        let raw = sample_frame();
        let raw_rows = raw.rows().unwrap();
        let params = FilterParams::builder().zone2("North").build();
        for row in raw.filter(&params).unwrap().rows().unwrap() {
            assert!(raw_rows.contains(&row));
        }
    }

    #[test]
    fn test_zone_options_keep_first_appearance_order() {
        let options = sample_frame().zone_options().unwrap();
        assert_eq!(
            options.zone1,
            vec![ZoneOption::new("A"), ZoneOption::new("B")]
        );
        assert_eq!(
            options.zone2,
            vec![ZoneOption::new("North"), ZoneOption::new("South")]
        );
        assert_eq!(options.zone1[0].label, options.zone1[0].value);
    }

    #[test]
    fn test_csv_export_has_canonical_header() {
        let csv = String::from_utf8(sample_frame().to_csv().unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CANONICAL.join(",").as_str()));
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_csv_export_of_empty_frame_is_header_only() {
        let raw = sample_frame();
        let params = FilterParams::builder().zone1("Z").build();
        let csv = String::from_utf8(raw.filter(&params).unwrap().to_csv().unwrap()).unwrap();
        assert_eq!(csv.trim_end(), CANONICAL.join(","));
    }

    #[test]
    fn test_pages() {
        let raw = sample_frame();
        let first = raw.page(0, 2).unwrap();
        assert_eq!(first.total_rows, 3);
        assert_eq!(first.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);

        let second = raw.page(1, 2).unwrap();
        assert_eq!(second.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

        assert!(raw.page(5, 2).unwrap().rows.is_empty());
        assert!(matches!(raw.page(0, 0), Err(DatasetError::ZeroPageSize)));
    }

    #[test]
    fn test_map_points_follow_rows() {
        let points = sample_frame().map_points().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!((points[0].lat, points[0].lon), (55.0, 37.0));
        assert_eq!(points[0].precipitation, Some(0.0));
    }
}
