use crate::enrichment::error::EnrichmentError;
use crate::frame::error::DatasetError;
use crate::session::store::SessionId;
use crate::upload::error::UploadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Unknown session '{0}'")]
    UnknownSession(SessionId),

    #[error("No enriched dataset has been uploaded to this session")]
    NoData,
}
