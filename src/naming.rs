//! Output filename policy.
//!
//! `<stem><suffix><extension>` where the suffix records which operations
//! ran and the extension follows the resolved output type:
//! - `photo.JPG`, blur 5, size 500 → `photo_blurred_and_compressed.jpg`
//! - `photo.png`, blur 0, size 0, override `small` → `photo_small.png`
//! - `anim.GIF`, no override format → `anim.GIF`

use crate::constants::{SUFFIX_BLURRED, SUFFIX_BLURRED_AND_COMPRESSED, SUFFIX_COMPRESSED};
use crate::formats::ImageType;
use std::path::{Path, PathBuf};

/// Suffix recording which operations were applied. A non-empty override
/// replaces it entirely.
pub fn output_suffix(blur: u32, size_kb: u64, suffix_override: Option<&str>) -> String {
    if let Some(name) = suffix_override.filter(|s| !s.is_empty()) {
        return format!("_{}", name);
    }

    match (blur > 0, size_kb > 0) {
        (true, true) => SUFFIX_BLURRED_AND_COMPRESSED,
        (true, false) => SUFFIX_BLURRED,
        (false, true) => SUFFIX_COMPRESSED,
        (false, false) => "",
    }
    .to_string()
}

pub fn output_file_name(
    input_path: &Path,
    blur: u32,
    size_kb: u64,
    suffix_override: Option<&str>,
    resolved: Option<ImageType>,
) -> String {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = output_suffix(blur, size_kb, suffix_override);

    let extension = match resolved.and_then(|ty| ty.output_extension()) {
        Some(ext) => format!(".{}", ext),
        None => input_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    };

    format!("{}{}{}", stem, suffix, extension)
}

pub fn output_path(
    output_dir: &Path,
    input_path: &Path,
    blur: u32,
    size_kb: u64,
    suffix_override: Option<&str>,
    resolved: Option<ImageType>,
) -> PathBuf {
    output_dir.join(output_file_name(
        input_path,
        blur,
        size_kb,
        suffix_override,
        resolved,
    ))
}
