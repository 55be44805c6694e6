//! Fixtures shared by the unit tests.

use crate::enrichment::merge::merge_weather;
use crate::frame::enriched_frame::EnrichedFrame;
use crate::types::row_query::{LatLon, RowQuery};
use crate::types::weather_record::WeatherRecord;
use crate::upload::input_frame::InputFrame;
use crate::upload::read_table;
use crate::weather_archive::error::ArchiveError;
use crate::weather_archive::source::WeatherSource;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// 00:00:00 UTC on 2021-06-01.
pub const JUNE_FIRST: i64 = 1_622_505_600;
pub const DAY: i64 = 86_400;
/// The sample points lie around Moscow, UTC+3.
pub const MOSCOW_OFFSET: i64 = 3 * 3_600;

pub const UPLOAD_CSV: &[u8] = b"type_name,type_id,lat,lon,dt,lesn1,lesn3\n\
    pine,1,55.0,37.0,2021/06/01,A,North\n\
    birch,2,56.0,38.0,2021/06/02,B,South\n\
    oak,3,57.0,39.0,2021/06/03,A,North\n";

/// Weather of row `id`, dated 2021-06-01 + `id` days in Moscow local time
/// the way the archive reports it with `timezone=auto`.
pub fn record(id: i64, weather_code: i64, precipitation: f64) -> WeatherRecord {
    WeatherRecord {
        id,
        time: JUNE_FIRST - MOSCOW_OFFSET + id * DAY,
        utc_offset_seconds: MOSCOW_OFFSET,
        weather_code: Some(weather_code),
        mean_temperature: Some(15.0 + id as f64),
        precipitation_sum: Some(precipitation),
        max_wind_speed: Some(10.0),
        dominant_wind_direction: Some(180.0),
    }
}

pub fn queries(n: i64) -> Vec<RowQuery> {
    let first = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    (0..n)
        .map(|id| {
            RowQuery::new(
                id,
                LatLon(55.0 + id as f64, 37.0 + id as f64),
                first.checked_add_days(Days::new(id as u64)).unwrap(),
            )
        })
        .collect()
}

pub fn input_frame() -> InputFrame {
    InputFrame::from_table(read_table("points.csv", UPLOAD_CSV).unwrap()).unwrap()
}

/// Three enriched rows: (A, North, dry thunderstorm), (B, South, no storm),
/// (A, North, wet thunderstorm) on 2021-06-01, 02 and 03.
pub fn sample_frame() -> EnrichedFrame {
    let weather = vec![
        (0, Some(record(0, 29, 0.0))),
        (1, Some(record(1, 1, 1.0))),
        (2, Some(record(2, 29, 2.5))),
    ];
    merge_weather(&input_frame(), &weather).unwrap()
}

/// In-memory weather source: answers from a table of records, optionally
/// after a per-row delay, and remembers in which order lookups finished.
pub struct StaticSource {
    records: HashMap<i64, WeatherRecord>,
    delays: HashMap<i64, Duration>,
    failing: HashSet<i64>,
    completed: Mutex<Vec<i64>>,
}

impl StaticSource {
    pub fn new(records: impl IntoIterator<Item = WeatherRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
            delays: HashMap::new(),
            failing: HashSet::new(),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Rows 0..=2 alternate between dry and wet thunderstorms.
    pub fn thunderstorms() -> Self {
        Self::new([record(0, 29, 0.0), record(1, 29, 1.0), record(2, 29, 0.0)])
    }

    pub fn with_delay(mut self, id: i64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub fn failing(mut self, id: i64) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn completion_order(&self) -> Vec<i64> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for StaticSource {
    async fn daily_weather(&self, query: &RowQuery) -> Result<WeatherRecord, ArchiveError> {
        if let Some(delay) = self.delays.get(&query.id) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(query.id);

        if self.failing.contains(&query.id) {
            return Err(ArchiveError::MissingDailyValue {
                id: query.id,
                field: "weathercode",
            });
        }
        self.records
            .get(&query.id)
            .cloned()
            .ok_or(ArchiveError::MissingDailyValue {
                id: query.id,
                field: "time",
            })
    }
}
