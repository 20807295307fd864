use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by an [`ImageCodec`](crate::codec::ImageCodec).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Unrecognized image data")]
    UnknownFormat,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to read folder {path:?}: {source}")]
    FolderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path:?}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quality value: {0}. Must be between 0 and 100")]
    InvalidQuality(u8),

    #[error("Failed to read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to blur {path:?}: {source}")]
    Blur {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to read dimensions of {path:?}: {source}")]
    DimensionQuery {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot fit {path:?} under {ceiling} bytes (smallest candidate: {smallest} bytes)")]
    SizeCeilingUnreachable {
        path: PathBuf,
        ceiling: u64,
        smallest: u64,
    },
}

impl ProcessError {
    /// Pipeline stage the error was raised in, for reporting.
    pub fn stage(&self) -> &'static str {
        match self {
            ProcessError::FolderRead { .. } => "list",
            ProcessError::DirectoryCreationFailed { .. } => "setup",
            ProcessError::InvalidQuality(_) => "setup",
            ProcessError::FileRead { .. } => "read",
            ProcessError::Decode { .. } => "decode",
            ProcessError::Blur { .. } => "blur",
            ProcessError::Encode { .. } => "encode",
            ProcessError::DimensionQuery { .. } => "dimensions",
            ProcessError::Write { .. } => "write",
            ProcessError::UnsupportedFormat(_) => "encode",
            ProcessError::SizeCeilingUnreachable { .. } => "size-fit",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
