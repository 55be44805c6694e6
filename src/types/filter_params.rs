//! Filter parameters applied to a session's raw dataset.

use bon::Builder;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The four optional filters of the dashboard.
///
/// Every supplied parameter adds one predicate; the predicates are combined
/// with a logical AND. A parameter left unset places no constraint on its axis.
///
/// * `start_date` / `end_date` are inclusive calendar days in each row's
///   local time: a row recorded on 2021-06-01 in Moscow matches
///   `2021-06-01` even though its `time` is 21:00 UTC on May 31.
/// * `zone1` / `zone2` select rows whose zone column equals the value exactly.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use forest_weather::FilterParams;
///
/// let params = FilterParams::builder()
///     .start_date(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap())
///     .zone1("A")
///     .build();
///
/// assert!(params.end_date.is_none());
/// assert_eq!(params.zone1.as_deref(), Some("A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct FilterParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[builder(into)]
    pub zone1: Option<String>,
    #[builder(into)]
    pub zone2: Option<String>,
}

impl FilterParams {
    /// `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.zone1.is_none()
            && self.zone2.is_none()
    }

    /// Treats blank zone values as unset, the way an emptied selector reports them.
    pub fn normalized(mut self) -> Self {
        self.zone1 = self.zone1.filter(|z| !z.trim().is_empty());
        self.zone2 = self.zone2.filter(|z| !z.trim().is_empty());
        self
    }

    /// Lower bound: 00:00:00 of `start_date`, in local seconds since the epoch.
    pub fn start_timestamp(&self) -> Option<i64> {
        self.start_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp())
    }

    /// Upper bound: 23:59:59 of `end_date`, in local seconds since the epoch.
    pub fn end_timestamp(&self) -> Option<i64> {
        self.end_date.and_then(|date| {
            date.and_hms_opt(23, 59, 59)
                .map(|end| end.and_utc().timestamp())
        })
    }
}
