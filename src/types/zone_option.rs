use serde::Serialize;

/// One entry of a zone selector: the label shown and the value filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneOption {
    pub label: String,
    pub value: String,
}

impl ZoneOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Distinct zone values of a raw dataset, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneOptions {
    pub zone1: Vec<ZoneOption>,
    pub zone2: Vec<ZoneOption>,
}
