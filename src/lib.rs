mod dashboard;
mod enrichment;
mod error;
mod filtering;
mod frame;
mod server;
mod session;
mod types;
mod upload;
mod weather_archive;

#[cfg(test)]
mod test_support;

pub use dashboard::*;
pub use error::DashboardError;
pub use filtering::DashboardFrameFilterExt;

pub use types::dry_thunderstorm::{DryThunderstorm, THUNDERSTORM_CODE};
pub use types::enriched_row::{EnrichedRow, MapPoint};
pub use types::filter_params::FilterParams;
pub use types::row_query::{LatLon, RowQuery};
pub use types::weather_record::WeatherRecord;
pub use types::zone_option::{ZoneOption, ZoneOptions};

pub use weather_archive::client::{ArchiveClient, DAILY_FIELDS, DEFAULT_ARCHIVE_URL};
pub use weather_archive::error::ArchiveError;
pub use weather_archive::source::WeatherSource;

pub use upload::error::UploadError;
pub use upload::input_frame::InputFrame;
pub use upload::read_table;

pub use enrichment::error::EnrichmentError;
pub use enrichment::fetch::{fetch_weather, FailurePolicy, RowWeather};
pub use enrichment::merge::merge_weather;

pub use frame::columns;
pub use frame::enriched_frame::{EnrichedFrame, TablePage};
pub use frame::error::DatasetError;

pub use session::controls::Controls;
pub use session::state::{DashboardEvent, Session};
pub use session::store::{SessionId, SessionStore};

pub use server::handlers::EXPORT_FILE_NAME;
pub use server::{router, DEFAULT_MAX_UPLOAD_BYTES};
