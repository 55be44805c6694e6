//! HTTP client for the Open-Meteo historical weather archive.

use crate::types::row_query::RowQuery;
use crate::types::weather_record::WeatherRecord;
use crate::weather_archive::error::ArchiveError;
use crate::weather_archive::response::parse_response;
use crate::weather_archive::source::WeatherSource;
use async_trait::async_trait;
use bon::bon;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};

/// Default endpoint of the historical weather archive.
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Daily fields requested for every row, in the order the archive documents them.
pub const DAILY_FIELDS: &str = "weathercode,temperature_2m_mean,precipitation_sum,windspeed_10m_max,winddirection_10m_dominant";

/// Client for the weather archive API.
///
/// Every lookup is a single-day request (start date = end date = the row's
/// date) with `timezone=auto` and `timeformat=unixtime`, so the returned
/// `time` is the start of the day in the point's local timezone.
///
/// # Examples
///
/// ```
/// use forest_weather::ArchiveClient;
///
/// // Default endpoint
/// let client = ArchiveClient::default();
///
/// // Custom endpoint, e.g. a self-hosted archive mirror
/// let mirror = ArchiveClient::builder()
///     .base_url("http://localhost:8080/v1/archive")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    base_url: String,
    timezone: String,
    http: Client,
}

#[bon]
impl ArchiveClient {
    /// Creates a new `ArchiveClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Archive endpoint (default: [`DEFAULT_ARCHIVE_URL`]).
    /// * `timezone` - Timezone parameter sent with each request (default: `"auto"`).
    /// * `http` - A preconfigured `reqwest::Client`, e.g. with a custom timeout.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] timezone: Option<String>,
        http: Option<Client>,
    ) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
            timezone: timezone.unwrap_or_else(|| "auto".to_string()),
            http: http.unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, query: &RowQuery) -> RequestBuilder {
        let date = query.date.format("%Y-%m-%d").to_string();
        self.http.get(&self.base_url).query(&[
            ("latitude", query.location.0.to_string()),
            ("longitude", query.location.1.to_string()),
            ("start_date", date.clone()),
            ("end_date", date),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.timezone.clone()),
            ("timeformat", "unixtime".to_string()),
        ])
    }
}

impl Default for ArchiveClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[async_trait]
impl WeatherSource for ArchiveClient {
    async fn daily_weather(&self, query: &RowQuery) -> Result<WeatherRecord, ArchiveError> {
        let request = self
            .request(query)
            .build()
            .map_err(|e| ArchiveError::NetworkRequest(self.base_url.clone(), e))?;
        let url = request.url().to_string();
        debug!("Requesting archive weather for row {} from {}", query.id, url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ArchiveError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ArchiveError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;
        parse_response(&body, &url, query.id)
    }
}
