use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse archive response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    // The archive answered but a daily array held no element for the requested day
    #[error("Archive response for row {id} has no value for '{field}'")]
    MissingDailyValue { id: i64, field: &'static str },
}
