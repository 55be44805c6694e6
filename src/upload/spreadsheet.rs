use crate::upload::error::UploadError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use polars::prelude::{Column, DataFrame};
use std::io::Cursor;

/// Reads the first sheet of a workbook. The first row is the header; every
/// cell is carried as text and typed later during normalisation.
pub(crate) fn read_spreadsheet(bytes: &[u8]) -> Result<DataFrame, UploadError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(UploadError::Spreadsheet)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(UploadError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(UploadError::Spreadsheet)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(UploadError::Empty);
    };
    let header: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| cell_text(cell).unwrap_or_else(|| format!("column_{i}")))
        .collect();

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
    for row in rows {
        for (i, column) in values.iter_mut().enumerate() {
            column.push(row.get(i).and_then(cell_text));
        }
    }

    let columns = header
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.trim().to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        // Excel serial dates
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|datetime| datetime.date().format("%Y-%m-%d").to_string()),
    }
}
