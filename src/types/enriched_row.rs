use serde::Serialize;

/// One collected row of an enriched dataset, in canonical column order.
///
/// Passthrough columns are carried as text since uploads decide their types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    pub id: i64,
    pub type_name: Option<String>,
    pub type_id: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub zone1: Option<String>,
    pub zone2: Option<String>,
    pub time: i64,
    pub weather_code: Option<i64>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub dry_thunderstorm: String,
}

/// A point of the map view, coloured by precipitation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

impl From<&EnrichedRow> for MapPoint {
    fn from(row: &EnrichedRow) -> Self {
        Self {
            id: row.id,
            lat: row.lat,
            lon: row.lon,
            precipitation: row.precipitation,
            weather_code: row.weather_code,
            temperature: row.temperature,
            wind_speed: row.wind_speed,
            wind_direction: row.wind_direction,
        }
    }
}
