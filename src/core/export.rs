// CtrlMend - core/export.rs
//
// JSON export of a batch summary.
// Core layer: writes to any Write trait object.

use crate::core::model::BatchSummary;
use crate::util::error::ReportError;
use std::io::Write;
use std::path::Path;

/// Export the batch summary as pretty-printed JSON.
///
/// `export_path` is used for error messages only. Returns the number of
/// per-file outcomes written.
pub fn export_json<W: Write>(
    summary: &BatchSummary,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ReportError> {
    serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| ReportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| ReportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(summary.files.len())
}
