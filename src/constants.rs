pub const DEFAULT_QUALITY: u8 = 100;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_INPUT_FOLDER: &str = "img";
pub const DEFAULT_OUTPUT_FOLDER: &str = "img_out";

/// Bytes per unit of the `--size` flag (kilobytes).
pub const SIZE_UNIT_BYTES: u64 = 1024;

// Size-fit search
pub const QUALITY_STEP: u8 = 10;
pub const QUALITY_FLOOR: u8 = 10;
pub const SHRINK_PERCENT: u32 = 90;
pub const MIN_DIMENSION: u32 = 1;
pub const MAX_FIT_ITERATIONS: usize = 256;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
pub const OXIPNG_PRESET: u8 = 2;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

pub const SUFFIX_BLURRED_AND_COMPRESSED: &str = "_blurred_and_compressed";
pub const SUFFIX_BLURRED: &str = "_blurred";
pub const SUFFIX_COMPRESSED: &str = "_compressed";

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
