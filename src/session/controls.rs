use serde::Serialize;

/// Which dashboard controls are usable.
///
/// Everything that consumes the filtered dataset (filter, clear, export, map)
/// is disabled until an upload has been enriched successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub filter_enabled: bool,
    pub clear_enabled: bool,
    pub export_enabled: bool,
    pub map_visible: bool,
}

impl Controls {
    pub fn for_data(has_data: bool) -> Self {
        Self {
            filter_enabled: has_data,
            clear_enabled: has_data,
            export_enabled: has_data,
            map_visible: has_data,
        }
    }
}
