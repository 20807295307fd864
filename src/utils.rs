//! Helpers shared by the binary and the batch summary.

use crate::error::{ProcessError, Result};
use std::fs;
use std::path::Path;

/// Create the output directory (and parents) if it does not exist yet.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ProcessError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Human-readable size using binary units, e.g. `512 B`, `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

/// Size reduction as a percentage; negative when the output grew.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
