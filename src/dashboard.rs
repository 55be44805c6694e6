//! This module provides the main entry point of the crate: a [`Dashboard`]
//! that owns the weather source and every session's datasets.

use crate::enrichment::fetch::{fetch_weather, FailurePolicy};
use crate::enrichment::merge::merge_weather;
use crate::error::DashboardError;
use crate::frame::enriched_frame::{EnrichedFrame, TablePage};
use crate::session::controls::Controls;
use crate::session::state::{DashboardEvent, Session};
use crate::session::store::{SessionId, SessionStore};
use crate::types::enriched_row::MapPoint;
use crate::types::filter_params::FilterParams;
use crate::types::zone_option::ZoneOptions;
use crate::upload::input_frame::InputFrame;
use crate::upload::read_table;
use crate::weather_archive::client::ArchiveClient;
use crate::weather_archive::source::WeatherSource;
use bon::bon;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Rows per table page unless the caller asks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Precipitation (mm) spanned by the map's colour scale.
pub const PRECIPITATION_COLOR_RANGE: [f64; 2] = [0.0, 10.0];

/// What a client needs to render a session after any action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub controls: Controls,
    pub raw_rows: usize,
    pub filtered_rows: usize,
    pub filters: FilterParams,
}

impl SessionView {
    fn of(session_id: SessionId, session: &Session) -> Self {
        Self {
            session_id,
            controls: session.controls(),
            raw_rows: session.raw().map_or(0, EnrichedFrame::height),
            filtered_rows: session.filtered().map_or(0, EnrichedFrame::height),
            filters: session.params().clone(),
        }
    }
}

/// Map view of the filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub points: Vec<MapPoint>,
    pub color_range: [f64; 2],
}

/// The dashboard: upload → enrich → filter → table / map / export, per session.
///
/// Create an instance with [`Dashboard::builder()`]. Without an explicit
/// source the dashboard queries the public archive through
/// [`ArchiveClient::default()`].
///
/// # Examples
///
/// ```no_run
/// # use forest_weather::{Dashboard, DashboardError, FilterParams};
/// # async fn run(csv: &[u8]) -> Result<(), DashboardError> {
/// let dashboard = Dashboard::builder().build();
/// let session = dashboard.create_session().await;
///
/// let view = dashboard.upload(session, "points.csv", csv).await?;
/// println!("{} rows enriched", view.raw_rows);
///
/// dashboard
///     .apply_filter(session, FilterParams::builder().zone1("A").build())
///     .await?;
/// let csv = dashboard.export_csv(session).await?;
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    failure_policy: FailurePolicy,
    sessions: SessionStore,
}

#[bon]
impl Dashboard {
    /// Creates a new `Dashboard`.
    ///
    /// # Arguments
    ///
    /// * `source` - Where weather comes from (default: the public archive).
    /// * `failure_policy` - How failed lookups affect an upload (default:
    ///   [`FailurePolicy::AbortBatch`]).
    #[builder]
    pub fn new(
        source: Option<Arc<dyn WeatherSource>>,
        failure_policy: Option<FailurePolicy>,
    ) -> Self {
        Self {
            source: source.unwrap_or_else(|| Arc::new(ArchiveClient::default())),
            failure_policy: failure_policy.unwrap_or_default(),
            sessions: SessionStore::new(),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub async fn create_session(&self) -> SessionId {
        let id = self.sessions.create().await;
        info!("Created session {}", id);
        id
    }

    pub async fn close_session(&self, session: SessionId) -> bool {
        self.sessions.remove(session).await
    }

    /// Drops every session that has not been used for `max_idle`, with its datasets.
    pub async fn evict_idle_sessions(&self, max_idle: Duration) -> usize {
        let evicted = self.sessions.evict_idle(max_idle).await;
        if evicted > 0 {
            info!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    /// Parses and enriches an uploaded file and makes it the session's raw dataset.
    ///
    /// A file that cannot be read, or whose enrichment fails, is logged and
    /// leaves the session empty: this is not reported as an error, the
    /// returned view simply shows no data and disabled controls.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownSession`] if `session` does not exist.
    pub async fn upload(
        &self,
        session: SessionId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<SessionView, DashboardError> {
        if !self.sessions.contains(session).await {
            return Err(DashboardError::UnknownSession(session));
        }

        let event = match self.enrich(file_name, bytes).await {
            Ok(frame) => {
                info!(
                    "Session {}: enriched {} rows from '{}'",
                    session,
                    frame.height(),
                    file_name
                );
                DashboardEvent::Upload(frame)
            }
            Err(e) => {
                warn!("Session {}: discarding upload '{}': {}", session, file_name, e);
                DashboardEvent::UploadFailed
            }
        };

        self.sessions
            .update(session, |s| {
                s.handle(event)?;
                Ok(SessionView::of(session, s))
            })
            .await
    }

    /// Reads, validates and enriches a file without touching any session.
    pub async fn enrich(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<EnrichedFrame, DashboardError> {
        let input = InputFrame::from_table(read_table(file_name, bytes)?)?;
        let weather =
            fetch_weather(self.source.as_ref(), input.queries(), self.failure_policy).await?;
        Ok(merge_weather(&input, &weather)?)
    }

    /// Replaces the session's filtered dataset with `params` applied to its raw dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoData`] if nothing has been uploaded.
    pub async fn apply_filter(
        &self,
        session: SessionId,
        params: FilterParams,
    ) -> Result<SessionView, DashboardError> {
        self.dispatch(session, DashboardEvent::ApplyFilter(params))
            .await
    }

    /// Resets the filtered dataset to the raw dataset and unsets every filter.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoData`] if nothing has been uploaded.
    pub async fn clear_filters(&self, session: SessionId) -> Result<SessionView, DashboardError> {
        self.dispatch(session, DashboardEvent::ClearFilter).await
    }

    pub async fn view(&self, session: SessionId) -> Result<SessionView, DashboardError> {
        self.sessions
            .read(session, |s| Ok(SessionView::of(session, s)))
            .await
    }

    /// Zone selector options of the raw dataset.
    pub async fn zone_options(&self, session: SessionId) -> Result<ZoneOptions, DashboardError> {
        self.sessions
            .read(session, |s| s.options().cloned().ok_or(DashboardError::NoData))
            .await
    }

    /// A page of the filtered dataset.
    pub async fn table_page(
        &self,
        session: SessionId,
        page: usize,
        page_size: usize,
    ) -> Result<TablePage, DashboardError> {
        let filtered = self.filtered(session).await?;
        Ok(filtered.page(page, page_size)?)
    }

    /// The filtered dataset as map points.
    pub async fn map_view(&self, session: SessionId) -> Result<MapView, DashboardError> {
        let filtered = self.filtered(session).await?;
        Ok(MapView {
            points: filtered.map_points()?,
            color_range: PRECIPITATION_COLOR_RANGE,
        })
    }

    /// The filtered dataset as CSV.
    pub async fn export_csv(&self, session: SessionId) -> Result<Vec<u8>, DashboardError> {
        let filtered = self.filtered(session).await?;
        Ok(filtered.to_csv()?)
    }

    async fn filtered(&self, session: SessionId) -> Result<EnrichedFrame, DashboardError> {
        self.sessions
            .read(session, |s| s.filtered().cloned().ok_or(DashboardError::NoData))
            .await
    }

    async fn dispatch(
        &self,
        session: SessionId,
        event: DashboardEvent,
    ) -> Result<SessionView, DashboardError> {
        self.sessions
            .update(session, |s| {
                s.handle(event)?;
                Ok(SessionView::of(session, s))
            })
            .await
    }
}
