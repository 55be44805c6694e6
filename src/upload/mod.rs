//! Turning uploaded files into an [`InputFrame`].

pub mod csv;
pub mod error;
pub mod input_frame;
pub mod spreadsheet;

use crate::upload::error::UploadError;
use log::info;
use polars::prelude::DataFrame;
use std::path::Path;

/// Reads an uploaded file into a `DataFrame`, choosing the decoder from the
/// file name's extension.
///
/// * `.csv` is read with polars' CSV reader (header row required).
/// * `.xls`, `.xlsx`, `.xlsm`, `.xlsb` and `.ods` are read with calamine, first sheet.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedFormat`] for any other extension, or the
/// decoder's error when the bytes cannot be read.
pub fn read_table(file_name: &str, bytes: &[u8]) -> Result<DataFrame, UploadError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => csv::read_csv(bytes)?,
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => spreadsheet::read_spreadsheet(bytes)?,
        _ => return Err(UploadError::UnsupportedFormat(file_name.to_string())),
    };
    info!(
        "Read {} rows and {} columns from '{}'",
        table.height(),
        table.width(),
        file_name
    );
    Ok(table)
}
