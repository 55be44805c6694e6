use crate::upload::error::UploadError;
use polars::prelude::*;
use std::io::Cursor;

/// Parses CSV bytes with a header row into a `DataFrame`.
pub(crate) fn read_csv(bytes: &[u8]) -> Result<DataFrame, UploadError> {
    std::str::from_utf8(bytes).map_err(UploadError::Encoding)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(UploadError::Csv)
}
