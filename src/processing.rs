use crate::codec::ImageCodec;
use crate::constants::{MAX_QUALITY, SIZE_UNIT_BYTES};
use crate::error::{ProcessError, Result};
use crate::fit::fit_to_ceiling;
use crate::formats::{resolve_output_type, ImageType};
use crate::naming::output_path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything one run needs to know, fixed before the first file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    pub quality: u8,
    /// Size ceiling in kilobytes; 0 disables size fitting.
    pub size_kb: u64,
    /// Gaussian blur sigma; 0 disables blurring.
    pub blur: u32,
    /// Forced output type; `None` keeps the source type.
    pub format: Option<ImageType>,
    pub output_dir: PathBuf,
    pub suffix_override: Option<String>,
}

impl ProcessingRequest {
    pub fn new(
        quality: u8,
        size_kb: u64,
        blur: u32,
        format: Option<ImageType>,
        output_dir: PathBuf,
        suffix_override: Option<String>,
    ) -> Result<Self> {
        if quality > MAX_QUALITY {
            return Err(ProcessError::InvalidQuality(quality));
        }

        Ok(Self {
            quality,
            size_kb,
            blur,
            format,
            output_dir,
            suffix_override: suffix_override.filter(|s| !s.is_empty()),
        })
    }

    /// Size ceiling in bytes, if one was requested.
    pub fn ceiling_bytes(&self) -> Option<u64> {
        (self.size_kb > 0).then(|| self.size_kb.saturating_mul(SIZE_UNIT_BYTES))
    }
}

/// A successfully written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub written_size: u64,
    pub quality: u8,
    pub output_type: ImageType,
    /// Dimensions the size fit shrank to, if it had to.
    pub dimensions: Option<(u32, u32)>,
    pub fit_iterations: usize,
}

/// Runs one file through read → blur → size fit → encode → write.
///
/// Nothing is written unless every earlier stage succeeds.
pub fn process_image<C: ImageCodec + ?Sized>(
    codec: &C,
    input_path: &Path,
    request: &ProcessingRequest,
) -> Result<ProcessOutcome> {
    let raw = fs::read(input_path).map_err(|source| ProcessError::FileRead {
        path: input_path.to_path_buf(),
        source,
    })?;
    let original_size = raw.len() as u64;

    let mut buffer = codec.decode(raw).map_err(|source| ProcessError::Decode {
        path: input_path.to_path_buf(),
        source,
    })?;

    let source_type = buffer.image_type().or_else(|| codec.infer_type(&buffer));
    let output_type = resolve_output_type(request.format, source_type).ok_or_else(|| {
        ProcessError::UnsupportedFormat(format!("cannot determine format of {:?}", input_path))
    })?;

    if request.blur > 0 {
        debug!(path = %input_path.display(), sigma = request.blur, "applying blur");
        buffer = codec
            .blur(&buffer, request.blur as f32)
            .map_err(|source| ProcessError::Blur {
                path: input_path.to_path_buf(),
                source,
            })?;
    }

    let (bytes, quality, dimensions, fit_iterations) = match request.ceiling_bytes() {
        Some(ceiling) => {
            let fit = fit_to_ceiling(
                codec,
                input_path,
                &buffer,
                request.quality,
                output_type,
                ceiling,
            )?;
            (fit.bytes, fit.quality, fit.dimensions, fit.iterations)
        }
        None => {
            let bytes = codec
                .encode(&buffer, request.quality, output_type, None, None)
                .map_err(|source| ProcessError::Encode {
                    path: input_path.to_path_buf(),
                    source,
                })?;
            (bytes, request.quality, None, 0)
        }
    };

    let output = output_path(
        &request.output_dir,
        input_path,
        request.blur,
        request.size_kb,
        request.suffix_override.as_deref(),
        Some(output_type),
    );
    fs::write(&output, &bytes).map_err(|source| ProcessError::Write {
        path: output.clone(),
        source,
    })?;

    info!(
        input = %input_path.display(),
        output = %output.display(),
        quality,
        size = bytes.len(),
        "image processed"
    );

    Ok(ProcessOutcome {
        input: input_path.to_path_buf(),
        output,
        original_size,
        written_size: bytes.len() as u64,
        quality,
        output_type,
        dimensions,
        fit_iterations,
    })
}
