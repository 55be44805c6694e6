use crate::types::dry_thunderstorm::DryThunderstorm;
use serde::Serialize;

/// Daily weather returned by the archive for one uploaded row.
///
/// Values are optional because the archive reports `null` for days it has
/// no observations for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub id: i64,                               // row id of the upload
    pub time: i64,                             // unix timestamp, start of the local day
    pub utc_offset_seconds: i64,               // offset of the point's local time from UTC
    pub weather_code: Option<i64>,             // weathercode (WMO)
    pub mean_temperature: Option<f64>,         // temperature_2m_mean (°C)
    pub precipitation_sum: Option<f64>,        // precipitation_sum (mm)
    pub max_wind_speed: Option<f64>,           // windspeed_10m_max (km/h)
    pub dominant_wind_direction: Option<f64>,  // winddirection_10m_dominant (°)
}

impl WeatherRecord {
    pub fn dry_thunderstorm(&self) -> DryThunderstorm {
        DryThunderstorm::classify(self.weather_code, self.precipitation_sum)
    }

    /// The local calendar day the record describes.
    pub fn local_date(&self) -> Option<chrono::NaiveDate> {
        chrono::DateTime::from_timestamp(self.time + self.utc_offset_seconds, 0)
            .map(|local| local.date_naive())
    }
}
