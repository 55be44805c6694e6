use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use forest_weather::LatLon;
///
/// let plot = LatLon(55.75, 37.61);
/// assert_eq!(plot.0, 55.75); // Latitude
/// assert_eq!(plot.1, 37.61); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// The part of an uploaded row needed to look up its weather: the row id,
/// where the point is and which day it was recorded.
///
/// The id is the zero-based row index of the upload and is what ties the
/// weather record back to its row, independent of the order in which
/// lookups complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowQuery {
    pub id: i64,
    pub location: LatLon,
    pub date: NaiveDate,
}

impl RowQuery {
    pub fn new(id: i64, location: LatLon, date: NaiveDate) -> Self {
        Self { id, location, date }
    }

    /// Unix timestamp of 00:00:00 UTC on the row's date.
    pub(crate) fn utc_day_start(&self) -> i64 {
        self.date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
    }
}
