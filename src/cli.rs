use crate::constants::{DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER, DEFAULT_QUALITY};
use crate::error::Result;
use crate::formats::{parse_format_override, ImageType};
use crate::processing::ProcessingRequest;
use clap::Parser;
use std::path::PathBuf;

fn parse_format(value: &str) -> std::result::Result<Option<ImageType>, String> {
    parse_format_override(value).map_err(|e| {
        format!(
            "{} (expected one of: {})",
            e,
            ImageType::format_names().join(", ")
        )
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "img-batch",
    about = "Blur, fit to a size budget, and re-encode every image in a folder",
    long_about = "img-batch processes every JPEG, PNG, WebP and GIF file directly inside a folder. \
                  Each image can be blurred, squeezed under a size ceiling by lowering quality and then \
                  dimensions, and converted to another format. Results are written to the output folder \
                  with a suffix describing what was done.",
    version,
    after_help = "EXAMPLES:\n  \
    img-batch -f photos -o out --blur 5 --size 500\n  \
    img-batch -f photos -F webp -q 80 -n web\n  \
    img-batch --folder scans --size 200 --jobs 0"
)]
pub struct Args {
    #[arg(short = 'f', long, default_value = DEFAULT_INPUT_FOLDER, help = "Path to the folder containing images")]
    pub folder: PathBuf,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Starting encode quality (0-100)",
        long_help = "Encode quality from 0 (lowest) to 100 (highest). With --size this is the \
                     starting point; quality drops in steps of 10 down to 10 before dimensions shrink."
    )]
    pub quality: u8,

    #[arg(
        short = 's',
        long,
        default_value_t = 0,
        help = "Size ceiling per image in kilobytes (0 = no limit)",
        long_help = "Every output file will be at most this many kilobytes (1 KB = 1024 bytes). \
                     Quality is lowered first, then width and height shrink by 10% per step."
    )]
    pub size: u64,

    #[arg(short = 'b', long, default_value_t = 0, help = "Gaussian blur sigma (0 = no blur)")]
    pub blur: u32,

    #[arg(
        short = 'F',
        long,
        default_value = "",
        value_parser = parse_format,
        help = "Output format (png, jpg, jpeg, webp); empty keeps the source format"
    )]
    pub format: ::std::option::Option<ImageType>,

    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_FOLDER,
        help = "Output directory, created if missing"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'n',
        long,
        default_value = "",
        help = "Suffix replacing the generated one (e.g. compressed_and_blurred)"
    )]
    pub name: String,

    #[arg(
        short = 'j',
        long,
        default_value_t = 1,
        help = "Number of images processed in parallel (0 = one per CPU)"
    )]
    pub jobs: usize,

    #[arg(short = 'v', long, help = "Log every size-fit step")]
    pub verbose: bool,

    #[arg(long, conflicts_with = "verbose", help = "Only log errors and hide the progress bar")]
    pub quiet: bool,
}

impl Args {
    pub fn to_request(&self) -> Result<ProcessingRequest> {
        ProcessingRequest::new(
            self.quality,
            self.size,
            self.blur,
            self.format,
            self.output.clone(),
            Some(self.name.clone()),
        )
    }
}
