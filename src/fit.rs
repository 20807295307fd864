//! Iterative size fitting.
//!
//! Quality drops in steps of [`QUALITY_STEP`] down to [`QUALITY_FLOOR`];
//! after that each round shrinks both dimensions to [`SHRINK_PERCENT`] of
//! the last candidate. The loop is capped at [`MAX_FIT_ITERATIONS`] and
//! stops when a dimension would fall under [`MIN_DIMENSION`].

use crate::codec::{ImageBuffer, ImageCodec};
use crate::constants::{
    MAX_FIT_ITERATIONS, MIN_DIMENSION, QUALITY_FLOOR, QUALITY_STEP, SHRINK_PERCENT,
};
use crate::error::{ProcessError, Result};
use crate::formats::ImageType;
use std::path::Path;
use tracing::debug;

/// The accepted candidate of a size-fit search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitOutcome {
    pub bytes: Vec<u8>,
    pub quality: u8,
    /// Target dimensions when shrinking was needed, `None` if the source
    /// dimensions were kept.
    pub dimensions: Option<(u32, u32)>,
    pub iterations: usize,
}

/// Quality for the next round, or `None` once the floor is reached.
pub fn next_quality(quality: u8) -> Option<u8> {
    if quality > QUALITY_FLOOR {
        Some(quality.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR))
    } else {
        None
    }
}

/// Dimensions for the next shrink round, or `None` when either side would
/// drop below the minimum.
pub fn shrink_dimensions((width, height): (u32, u32)) -> Option<(u32, u32)> {
    let w = (width as u64 * SHRINK_PERCENT as u64 / 100) as u32;
    let h = (height as u64 * SHRINK_PERCENT as u64 / 100) as u32;
    if w < MIN_DIMENSION || h < MIN_DIMENSION {
        None
    } else {
        Some((w, h))
    }
}

pub fn fit_to_ceiling<C: ImageCodec + ?Sized>(
    codec: &C,
    path: &Path,
    buffer: &ImageBuffer,
    start_quality: u8,
    target: ImageType,
    ceiling: u64,
) -> Result<FitOutcome> {
    let mut quality = start_quality;
    let mut dimensions: Option<(u32, u32)> = None;
    let mut smallest = u64::MAX;

    for iteration in 1..=MAX_FIT_ITERATIONS {
        let candidate = codec
            .encode(
                buffer,
                quality,
                target,
                dimensions.map(|d| d.0),
                dimensions.map(|d| d.1),
            )
            .map_err(|source| ProcessError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        let size = candidate.len() as u64;
        smallest = smallest.min(size);

        debug!(
            path = %path.display(),
            iteration,
            quality,
            ?dimensions,
            size,
            ceiling,
            "size-fit candidate"
        );

        if size <= ceiling {
            return Ok(FitOutcome {
                bytes: candidate,
                quality,
                dimensions,
                iterations: iteration,
            });
        }

        if let Some(q) = next_quality(quality) {
            quality = q;
            continue;
        }

        let last = ImageBuffer::new(candidate, Some(target), dimensions);
        let current = codec
            .dimensions(&last)
            .map_err(|source| ProcessError::DimensionQuery {
                path: path.to_path_buf(),
                source,
            })?;

        dimensions = match shrink_dimensions(current) {
            Some(next) => Some(next),
            None => break,
        };
    }

    Err(ProcessError::SizeCeilingUnreachable {
        path: path.to_path_buf(),
        ceiling,
        smallest,
    })
}
