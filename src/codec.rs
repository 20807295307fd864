//! Image codec adapter.
//!
//! The [`ImageCodec`] trait is the only place pixel data is touched. The
//! pipeline hands encoded [`ImageBuffer`]s back and forth and never looks
//! inside them.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode, type sniffing | `image::ImageReader::with_guessed_format` |
//! | Gaussian blur | `image::DynamicImage::blur`, kept as plain PNG |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Encode PNG | `image` PNG encoder, then `oxipng::optimize_from_memory` |
//! | Encode WebP | `image` lossless WebP encoder |
//! | Encode GIF | `image` GIF encoder |

use crate::constants::{
    LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_QUALITY, OXIPNG_PRESET, ZOPFLI_ITERATIONS,
};
use crate::error::CodecError;
use crate::formats::ImageType;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use oxipng::{Deflaters, Options};
use std::borrow::Cow;
use std::io::Cursor;
use std::num::NonZeroU8;

/// An encoded image plus what is known about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    bytes: Vec<u8>,
    image_type: Option<ImageType>,
    dimensions: Option<(u32, u32)>,
}

impl ImageBuffer {
    pub fn new(bytes: Vec<u8>, image_type: Option<ImageType>, dimensions: Option<(u32, u32)>) -> Self {
        Self {
            bytes,
            image_type,
            dimensions,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn image_type(&self) -> Option<ImageType> {
        self.image_type
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Pixel operations consumed by the pipeline. Implementations must not
/// mutate their inputs; every call returns new data.
pub trait ImageCodec: Sync {
    /// Validate and wrap encoded bytes.
    fn decode(&self, bytes: Vec<u8>) -> Result<ImageBuffer, CodecError>;

    /// Gaussian blur with the given sigma. The result is a lossless
    /// intermediate that keeps the image type recorded on `buffer`.
    fn blur(&self, buffer: &ImageBuffer, sigma: f32) -> Result<ImageBuffer, CodecError>;

    /// Encode at `quality` as `target`, resizing exactly to the given
    /// width/height first when either is set.
    fn encode(
        &self,
        buffer: &ImageBuffer,
        quality: u8,
        target: ImageType,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, CodecError>;

    /// Pixel dimensions, read from the header.
    fn dimensions(&self, buffer: &ImageBuffer) -> Result<(u32, u32), CodecError>;

    /// Type sniffed from the buffer's magic bytes.
    fn infer_type(&self, buffer: &ImageBuffer) -> Option<ImageType>;
}

/// Production codec built on the `image` crate and `oxipng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterCodec;

impl RasterCodec {
    pub fn new() -> Self {
        Self
    }
}

fn load(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(CodecError::UnknownFormat)?;
    Ok((reader.decode()?, format))
}

fn png_options(quality: u8) -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = if quality >= 90 {
        match NonZeroU8::new(ZOPFLI_ITERATIONS) {
            Some(iterations) => Deflaters::Zopfli { iterations },
            None => Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            },
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };
    options
}

/// Converts to a color layout the target encoder accepts.
fn encodable<'a>(img: &'a DynamicImage, target: ImageType) -> Cow<'a, DynamicImage> {
    let color = img.color();
    let supported = match target {
        ImageType::Jpeg => matches!(color, ColorType::L8 | ColorType::Rgb8),
        ImageType::Png => true,
        ImageType::WebP => matches!(
            color,
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
        ),
        ImageType::Gif => matches!(color, ColorType::Rgb8 | ColorType::Rgba8),
    };

    if supported {
        Cow::Borrowed(img)
    } else if target == ImageType::Jpeg {
        Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8()))
    } else {
        Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8()))
    }
}

fn encode_image(img: &DynamicImage, target: ImageType, quality: u8) -> Result<Vec<u8>, CodecError> {
    let img = encodable(img, target);
    let mut buf = Vec::new();

    match target {
        ImageType::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, MAX_QUALITY));
            img.write_with_encoder(encoder)?;
        }
        ImageType::Png => {
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
            buf = oxipng::optimize_from_memory(&buf, &png_options(quality))
                .map_err(|e| CodecError::PngOptimization(e.to_string()))?;
        }
        ImageType::WebP | ImageType::Gif => {
            img.write_to(&mut Cursor::new(&mut buf), target.to_image_format())?;
        }
    }

    Ok(buf)
}

impl ImageCodec for RasterCodec {
    fn decode(&self, bytes: Vec<u8>) -> Result<ImageBuffer, CodecError> {
        let (img, format) = load(&bytes)?;
        Ok(ImageBuffer::new(
            bytes,
            ImageType::from_image_format(format),
            Some(img.dimensions()),
        ))
    }

    fn blur(&self, buffer: &ImageBuffer, sigma: f32) -> Result<ImageBuffer, CodecError> {
        let (img, _) = load(buffer.bytes())?;
        let blurred = img.blur(sigma);

        // Unoptimized PNG: only the target encode may lose detail.
        let mut bytes = Vec::new();
        blurred.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(ImageBuffer::new(
            bytes,
            buffer.image_type(),
            Some(blurred.dimensions()),
        ))
    }

    fn encode(
        &self,
        buffer: &ImageBuffer,
        quality: u8,
        target: ImageType,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, CodecError> {
        let (mut img, _) = load(buffer.bytes())?;

        if width.is_some() || height.is_some() {
            let w = width.unwrap_or(img.width());
            let h = height.unwrap_or(img.height());
            if (w, h) != img.dimensions() {
                img = img.resize_exact(w, h, FilterType::Lanczos3);
            }
        }

        encode_image(&img, target, quality)
    }

    fn dimensions(&self, buffer: &ImageBuffer) -> Result<(u32, u32), CodecError> {
        let reader = ImageReader::new(Cursor::new(buffer.bytes())).with_guessed_format()?;
        Ok(reader.into_dimensions()?)
    }

    fn infer_type(&self, buffer: &ImageBuffer) -> Option<ImageType> {
        image::guess_format(buffer.bytes())
            .ok()
            .and_then(ImageType::from_image_format)
    }
}
