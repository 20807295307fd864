pub mod batch;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod fit;
pub mod formats;
pub mod logger;
pub mod naming;
pub mod processing;
pub mod utils;

pub use batch::{collect_image_files, is_image_file, process_folder, BatchReport, Parallelism};
pub use codec::{ImageBuffer, ImageCodec, RasterCodec};
pub use error::{CodecError, ProcessError, Result};
pub use fit::{fit_to_ceiling, FitOutcome};
pub use formats::ImageType;
pub use naming::{output_file_name, output_path, output_suffix};
pub use processing::{process_image, ProcessOutcome, ProcessingRequest};
