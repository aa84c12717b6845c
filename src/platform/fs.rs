// CtrlMend - platform/fs.rs
//
// Whole-file read and write for target sources.

use crate::util::constants;
use crate::util::error::RepairError;
use std::path::Path;

/// Read a target file as UTF-8 text.
///
/// Invalid UTF-8 is an error; the content is never lossily decoded
/// because it is written back afterwards.
pub fn read_text(path: &Path) -> Result<String, RepairError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RepairError::NotFound {
            path: path.to_path_buf(),
        },
        _ => RepairError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if metadata.len() > constants::MAX_TARGET_FILE_SIZE {
        return Err(RepairError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_TARGET_FILE_SIZE,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| RepairError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    String::from_utf8(bytes).map_err(|e| RepairError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite a target file with `text`.
pub fn write_text(path: &Path, text: &str) -> Result<(), RepairError> {
    std::fs::write(path, text).map_err(|e| RepairError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
