use std::path::Path;

use crate::errors::GraftError;

/// Read a whole file as UTF-8, attaching the path to any failure.
pub fn read_to_string(path: &Path) -> Result<String, GraftError> {
    std::fs::read_to_string(path).map_err(|source| GraftError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// File name used when reporting parse errors: the path as given.
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}
