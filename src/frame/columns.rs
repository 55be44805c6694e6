//! Column names of uploaded and enriched tables.

pub const ID: &str = "id";
pub const TYPE_NAME: &str = "type_name";
pub const TYPE_ID: &str = "type_id";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";
pub const DATE: &str = "dt";
pub const ZONE1: &str = "zone1";
pub const ZONE2: &str = "zone2";
pub const TIME: &str = "time";
pub const WEATHER_CODE: &str = "weather_code";
pub const TEMPERATURE: &str = "temperature";
pub const PRECIPITATION: &str = "precipitation";
pub const WIND_SPEED: &str = "wind_speed";
pub const WIND_DIRECTION: &str = "wind_direction";
pub const DRY_THUNDERSTORM: &str = "dry_thunderstorm";

/// Seconds between the row's local time and UTC. Kept next to the canonical
/// columns so date filters can compare local days; never exported.
pub const UTC_OFFSET: &str = "utc_offset_seconds";

/// Forestry-office headers used by the inventory spreadsheets, renamed on upload.
pub const ZONE_ALIASES: [(&str, &str); 2] = [("lesn1", ZONE1), ("lesn3", ZONE2)];

/// Columns an upload must provide (after alias renaming).
pub const REQUIRED_INPUT: [&str; 7] = [TYPE_NAME, TYPE_ID, LAT, LON, DATE, ZONE1, ZONE2];

/// Column order of every enriched dataset, and of the CSV export.
pub const CANONICAL: [&str; 14] = [
    ID,
    TYPE_NAME,
    TYPE_ID,
    LAT,
    LON,
    ZONE1,
    ZONE2,
    TIME,
    WEATHER_CODE,
    TEMPERATURE,
    PRECIPITATION,
    WIND_SPEED,
    WIND_DIRECTION,
    DRY_THUNDERSTORM,
];

/// Every column an enriched frame holds: the canonical ones, then the internal ones.
pub const STORED: [&str; 15] = [
    ID,
    TYPE_NAME,
    TYPE_ID,
    LAT,
    LON,
    ZONE1,
    ZONE2,
    TIME,
    WEATHER_CODE,
    TEMPERATURE,
    PRECIPITATION,
    WIND_SPEED,
    WIND_DIRECTION,
    DRY_THUNDERSTORM,
    UTC_OFFSET,
];
