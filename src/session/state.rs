//! The per-session state machine of the dashboard.

use crate::error::DashboardError;
use crate::frame::enriched_frame::EnrichedFrame;
use crate::session::controls::Controls;
use crate::types::filter_params::FilterParams;
use crate::types::zone_option::ZoneOptions;
use log::debug;

/// Something the user did that changes a session.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// An upload was parsed and enriched; it becomes the new raw dataset.
    Upload(EnrichedFrame),
    /// An upload could not be parsed or enriched.
    UploadFailed,
    /// Filter the raw dataset with these parameters.
    ApplyFilter(FilterParams),
    /// Drop all filters.
    ClearFilter,
}

#[derive(Debug, Clone)]
struct Datasets {
    raw: EnrichedFrame,
    filtered: EnrichedFrame,
    options: ZoneOptions,
}

/// State of one dashboard session.
///
/// A session is either empty or holds exactly two datasets: the raw enriched
/// upload, and the filtered view derived from it. Transitions are
///
/// | state    | event          | new state                                   |
/// |----------|----------------|---------------------------------------------|
/// | any      | `Upload(d)`    | raw = filtered = d, filters unset           |
/// | any      | `UploadFailed` | empty, filters unset                        |
/// | has data | `ApplyFilter`  | filtered = filter(raw, params)              |
/// | has data | `ClearFilter`  | filtered = raw, filters unset               |
/// | empty    | `ApplyFilter` / `ClearFilter` | rejected with `NoData`       |
///
/// A transition that fails leaves the session unchanged.
#[derive(Debug, Clone, Default)]
pub struct Session {
    datasets: Option<Datasets>,
    params: FilterParams,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event and returns the resulting control flags.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::NoData`] for filter events on an empty session.
    /// * [`DashboardError::Dataset`] if filtering or listing zone options fails.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<Controls, DashboardError> {
        match event {
            DashboardEvent::Upload(raw) => {
                let options = raw.zone_options()?;
                debug!("Session received {} enriched rows", raw.height());
                self.datasets = Some(Datasets {
                    filtered: raw.clone(),
                    raw,
                    options,
                });
                self.params = FilterParams::default();
            }
            DashboardEvent::UploadFailed => {
                self.datasets = None;
                self.params = FilterParams::default();
            }
            DashboardEvent::ApplyFilter(params) => {
                let datasets = self.datasets.as_mut().ok_or(DashboardError::NoData)?;
                let params = params.normalized();
                datasets.filtered = datasets.raw.filter(&params)?;
                debug!(
                    "Filter kept {} of {} rows",
                    datasets.filtered.height(),
                    datasets.raw.height()
                );
                self.params = params;
            }
            DashboardEvent::ClearFilter => {
                let datasets = self.datasets.as_mut().ok_or(DashboardError::NoData)?;
                datasets.filtered = datasets.raw.clone();
                self.params = FilterParams::default();
            }
        }
        Ok(self.controls())
    }

    pub fn controls(&self) -> Controls {
        Controls::for_data(self.datasets.is_some())
    }

    pub fn has_data(&self) -> bool {
        self.datasets.is_some()
    }

    pub fn raw(&self) -> Option<&EnrichedFrame> {
        self.datasets.as_ref().map(|d| &d.raw)
    }

    pub fn filtered(&self) -> Option<&EnrichedFrame> {
        self.datasets.as_ref().map(|d| &d.filtered)
    }

    /// Zone options of the raw dataset; unchanged by filtering.
    pub fn options(&self) -> Option<&ZoneOptions> {
        self.datasets.as_ref().map(|d| &d.options)
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }
}
