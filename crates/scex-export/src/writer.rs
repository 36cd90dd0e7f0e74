//! Serialization of the flat row collection.
//!
//! CSV and JSON are produced from the same in-memory rows; because every
//! [`OutputRow`] field is already a `String`, the two formats cannot
//! diverge — booleans stay `"TRUE"`/`"FALSE"` literals in both.

use scex_core::{OutputRow, COLUMNS};

use crate::error::ExportError;

/// Serializes rows to CSV with a header row of the fixed column set.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] / [`ExportError::Io`] on writer failure,
/// [`ExportError::Utf8`] if the buffer is somehow not valid UTF-8.
pub fn to_csv(rows: &[OutputRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.as_record())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Serializes rows to a pretty-printed JSON array of objects keyed by the
/// column titles.
///
/// # Errors
///
/// Returns [`ExportError::Json`] on serialization failure.
pub fn to_json(rows: &[OutputRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}
