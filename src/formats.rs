//! Image format utilities and type-safe format handling
//!
//! `ImageType` covers every format the tool reads. Only JPEG, PNG and WebP
//! can be requested as an output override; GIF sources are re-encoded as GIF
//! unless an override is given.

use crate::error::{ProcessError, Result};
use image::ImageFormat;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageType {
    /// Extension written for this type, or `None` when the original
    /// extension should be kept.
    pub fn output_extension(&self) -> Option<&'static str> {
        match self {
            ImageType::Jpeg => Some("jpg"),
            ImageType::Png => Some("png"),
            ImageType::WebP => Some("webp"),
            ImageType::Gif => None,
        }
    }

    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            ImageType::Jpeg => ImageFormat::Jpeg,
            ImageType::Png => ImageFormat::Png,
            ImageType::WebP => ImageFormat::WebP,
            ImageType::Gif => ImageFormat::Gif,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageType::Jpeg),
            ImageFormat::Png => Some(ImageType::Png),
            ImageFormat::WebP => Some(ImageType::WebP),
            ImageFormat::Gif => Some(ImageType::Gif),
            _ => None,
        }
    }

    /// Format names accepted by `--format`.
    pub fn format_names() -> Vec<&'static str> {
        vec!["png", "jpg", "jpeg", "webp"]
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageType::Jpeg => "JPEG",
            ImageType::Png => "PNG",
            ImageType::WebP => "WebP",
            ImageType::Gif => "GIF",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ImageType {
    type Err = ProcessError;

    /// Parses an output override. GIF is readable but not a valid override.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageType::Jpeg),
            "png" => Ok(ImageType::Png),
            "webp" => Ok(ImageType::WebP),
            _ => Err(ProcessError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Parses the `--format` flag value: empty keeps the source format.
pub fn parse_format_override(value: &str) -> Result<Option<ImageType>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    ImageType::from_str(trimmed).map(Some)
}

/// Output type: the explicit override if any, else the source's type.
pub fn resolve_output_type(
    format_override: Option<ImageType>,
    source: Option<ImageType>,
) -> Option<ImageType> {
    format_override.or(source)
}
