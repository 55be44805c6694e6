//! Validation and typing of an uploaded table.

use crate::frame::columns::{DATE, ID, LAT, LON, REQUIRED_INPUT, ZONE1, ZONE2, ZONE_ALIASES};
use crate::types::row_query::{LatLon, RowQuery};
use crate::upload::error::UploadError;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// An uploaded table that passed validation, plus one [`RowQuery`] per row.
///
/// Compared to the raw upload the frame has:
/// * an `id` column holding the zero-based row index,
/// * `lesn1` / `lesn3` renamed to `zone1` / `zone2`,
/// * `lat` / `lon` as `Float64` and `zone1` / `zone2` as `String`.
///
/// Every other column is passed through untouched.
#[derive(Debug, Clone)]
pub struct InputFrame {
    frame: DataFrame,
    queries: Vec<RowQuery>,
}

impl InputFrame {
    /// Validates an uploaded table.
    ///
    /// # Errors
    ///
    /// * [`UploadError::Empty`] if the table has no rows.
    /// * [`UploadError::MissingColumn`] if a required column is absent.
    /// * [`UploadError::InvalidValue`] if a coordinate is not a number or a
    ///   date is neither `YYYY/MM/DD` nor `YYYY-MM-DD`.
    pub fn from_table(mut table: DataFrame) -> Result<Self, UploadError> {
        if table.height() == 0 {
            return Err(UploadError::Empty);
        }

        for (alias, name) in ZONE_ALIASES {
            if table.get_column_index(alias).is_some() && table.get_column_index(name).is_none() {
                table.rename(alias, name.into())?;
            }
        }
        for required in REQUIRED_INPUT {
            if table.get_column_index(required).is_none() {
                return Err(UploadError::MissingColumn(required));
            }
        }

        let lat = float_values(&table, LAT)?;
        let lon = float_values(&table, LON)?;
        let dates = date_values(&table)?;
        let ids: Vec<i64> = (0..table.height() as i64).collect();

        let zone1 = table.column(ZONE1)?.cast(&DataType::String)?;
        let zone2 = table.column(ZONE2)?.cast(&DataType::String)?;
        table.with_column(Column::new(LAT.into(), lat.clone()))?;
        table.with_column(Column::new(LON.into(), lon.clone()))?;
        table.with_column(zone1)?;
        table.with_column(zone2)?;
        table.with_column(Column::new(ID.into(), ids.clone()))?;

        let queries = ids
            .into_iter()
            .zip(lat.into_iter().zip(lon))
            .zip(dates)
            .map(|((id, (lat, lon)), date)| RowQuery::new(id, LatLon(lat, lon), date))
            .collect();

        Ok(Self {
            frame: table,
            queries,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn queries(&self) -> &[RowQuery] {
        &self.queries
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

fn float_values(table: &DataFrame, column: &'static str) -> Result<Vec<f64>, UploadError> {
    let values = table.column(column)?.cast(&DataType::Float64)?;
    values
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| value.ok_or(UploadError::InvalidValue { column, row }))
        .collect()
}

fn date_values(table: &DataFrame) -> Result<Vec<NaiveDate>, UploadError> {
    let values = table.column(DATE)?.cast(&DataType::String)?;
    values
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(parse_date)
                .ok_or(UploadError::InvalidValue { column: DATE, row })
        })
        .collect()
}

/// Parses the upload's date format: slash-delimited, or already ISO.
///
/// ISO datetimes (`2021-06-01T00:00:00`, `2021-06-01 00:00:00`), as written by
/// spreadsheet date cells and pandas exports, keep only their date.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date())
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::read_table;

    const UPLOAD: &[u8] = b"type_name,type_id,lat,lon,dt,lesn1,lesn3\n\
                            pine,1,55.0,37.0,2021/06/01,A,North\n\
                            birch,2,56.0,38.0,2021/06/02,B,South\n";

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 6, 1);
        assert_eq!(parse_date("2021/06/01"), expected);
        assert_eq!(parse_date("2021-06-01"), expected);
        assert_eq!(parse_date(" 2021/6/1 "), expected);
        assert_eq!(parse_date("2021-06-01T00:00:00"), expected);
        assert_eq!(parse_date("2021-06-01 13:45:00"), expected);
        assert_eq!(parse_date("2021-06-01T00:00:00.000"), expected);
        assert_eq!(parse_date("01.06.2021"), None);
    }

    #[test]
    fn test_from_table_builds_ids_and_queries() {
        let input = InputFrame::from_table(read_table("points.csv", UPLOAD).unwrap()).unwrap();

        assert_eq!(input.height(), 2);
        assert_eq!(
            input.queries(),
            &[
                RowQuery::new(0, LatLon(55.0, 37.0), NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()),
                RowQuery::new(1, LatLon(56.0, 38.0), NaiveDate::from_ymd_opt(2021, 6, 2).unwrap()),
            ]
        );

        let frame = input.frame();
        let ids: Vec<Option<i64>> = frame.column(ID).unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some(0), Some(1)]);
        assert!(frame.column(ZONE1).is_ok());
        assert!(frame.column("lesn1").is_err());
    }

    #[test]
    fn test_zone_columns_are_text() {
        let csv = b"type_name,type_id,lat,lon,dt,zone1,zone2\npine,1,55.0,37.0,2021-06-01,7,12\n";
        let input = InputFrame::from_table(read_table("points.csv", csv).unwrap()).unwrap();
        let zone1 = input.frame().column(ZONE1).unwrap();
        assert_eq!(zone1.dtype(), &DataType::String);
        assert_eq!(zone1.str().unwrap().get(0), Some("7"));
    }

    #[test]
    fn test_missing_column() {
        let csv = b"type_name,type_id,lat,dt,lesn1,lesn3\npine,1,55.0,2021/06/01,A,North\n";
        let err = InputFrame::from_table(read_table("points.csv", csv).unwrap()).unwrap_err();
        assert!(matches!(err, UploadError::MissingColumn("lon")));
    }

    #[test]
    fn test_invalid_date() {
        let csv = b"type_name,type_id,lat,lon,dt,lesn1,lesn3\npine,1,55.0,37.0,yesterday,A,North\n";
        let err = InputFrame::from_table(read_table("points.csv", csv).unwrap()).unwrap_err();
        assert!(matches!(err, UploadError::InvalidValue { column: "dt", row: 0 }));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let csv = b"type_name,type_id,lat,lon,dt,lesn1,lesn3\n";
        let err = InputFrame::from_table(read_table("points.csv", csv).unwrap()).unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }
}
