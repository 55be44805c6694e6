//! Defines the `DryThunderstorm` classification derived for every enriched row.

use serde::Serialize;
use std::fmt;

/// Weather code that marks a thunderstorm day.
pub const THUNDERSTORM_CODE: i64 = 29;

/// Whether a row's day was a thunderstorm without rain.
///
/// Stored in the `dry_thunderstorm` column as `"true"`, `"false"` or `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DryThunderstorm {
    /// Thunderstorm code and zero precipitation.
    True,
    /// Thunderstorm code with any other (or missing) precipitation.
    False,
    /// Not a thunderstorm day, or no weather code available.
    Unknown,
}

impl DryThunderstorm {
    /// Classifies a day from its weather code and precipitation sum.
    ///
    /// # Examples
    ///
    /// ```
    /// use forest_weather::DryThunderstorm;
    ///
    /// assert_eq!(DryThunderstorm::classify(Some(29), Some(0.0)), DryThunderstorm::True);
    /// assert_eq!(DryThunderstorm::classify(Some(29), Some(2.5)), DryThunderstorm::False);
    /// assert_eq!(DryThunderstorm::classify(Some(3), Some(0.0)), DryThunderstorm::Unknown);
    /// ```
    pub fn classify(weather_code: Option<i64>, precipitation: Option<f64>) -> Self {
        match (weather_code, precipitation) {
            (Some(THUNDERSTORM_CODE), Some(p)) if p == 0.0 => DryThunderstorm::True,
            (Some(THUNDERSTORM_CODE), _) => DryThunderstorm::False,
            _ => DryThunderstorm::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DryThunderstorm::True => "true",
            DryThunderstorm::False => "false",
            DryThunderstorm::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DryThunderstorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
