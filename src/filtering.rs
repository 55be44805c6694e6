use crate::frame::columns::{TIME, UTC_OFFSET, ZONE1, ZONE2};
use crate::types::filter_params::FilterParams;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// `time` shifted into the row's local wall clock, read as if it were UTC.
fn local_time() -> Expr {
    col(TIME) + col(UTC_OFFSET)
}

pub trait DashboardFrameFilterExt {
    /// Keeps rows whose local time (`time` + `utc_offset_seconds`) lies within
    /// the bounds (inclusive).
    ///
    /// # Arguments
    /// * `start`: Lower bound in local seconds since the epoch, or `None` for no lower bound.
    /// * `end`: Upper bound in local seconds since the epoch, or `None` for no upper bound.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied, or the input unchanged
    /// when both bounds are `None`.
    fn filter_time(self, start: Option<i64>, end: Option<i64>) -> LazyFrame;

    /// Keeps rows whose `column` equals `value` exactly. `None` keeps every row.
    fn filter_zone(self, column: &str, value: Option<&str>) -> LazyFrame;

    /// Applies every supplied parameter of `params` as one conjunction.
    fn filter_params(self, params: &FilterParams) -> LazyFrame;
}

impl DashboardFrameFilterExt for LazyFrame {
    fn filter_time(self, start: Option<i64>, end: Option<i64>) -> LazyFrame {
        let frame = match start {
            Some(start) => self.filter(local_time().gt_eq(lit(start))),
            None => self,
        };
        match end {
            Some(end) => frame.filter(local_time().lt_eq(lit(end))),
            None => frame,
        }
    }

    fn filter_zone(self, column: &str, value: Option<&str>) -> LazyFrame {
        match value {
            Some(value) => self.filter(col(column).eq(lit(value.to_string()))),
            None => self,
        }
    }

    fn filter_params(self, params: &FilterParams) -> LazyFrame {
        self.filter_time(params.start_timestamp(), params.end_timestamp())
            .filter_zone(ZONE1, params.zone1.as_deref())
            .filter_zone(ZONE2, params.zone2.as_deref())
    }
}
