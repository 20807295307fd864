use crate::codec::ImageCodec;
use crate::constants::{PROGRESS_BAR_TEMPLATE, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{ProcessError, Result};
use crate::processing::{process_image, ProcessOutcome, ProcessingRequest};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// How files are spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Threads(usize),
}

impl Parallelism {
    /// `1` runs sequentially, `0` uses every CPU.
    pub fn from_jobs(jobs: usize) -> Self {
        match jobs {
            1 => Parallelism::Sequential,
            0 => Parallelism::Threads(num_cpus::get().max(1)),
            n => Parallelism::Threads(n),
        }
    }
}

/// Per-file results of one run, in listing order.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<ProcessOutcome>)>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ProcessOutcome> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&PathBuf, &ProcessError)> {
        self.results
            .iter()
            .filter_map(|(p, r)| r.as_ref().err().map(|e| (p, e)))
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn total_original_size(&self) -> u64 {
        self.succeeded().map(|o| o.original_size).sum()
    }

    pub fn total_written_size(&self) -> u64 {
        self.succeeded().map(|o| o.written_size).sum()
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists image files directly inside `folder`, sorted by file name.
pub fn collect_image_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(folder).map_err(|source| ProcessError::FolderRead {
        path: folder.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ProcessError::FolderRead {
            path: folder.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut image_files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ProcessError::FolderRead {
            path: folder.to_path_buf(),
            source: source.into(),
        })?;

        if entry.path().is_file() && is_image_file(entry.path()) {
            image_files.push(entry.into_path());
        }
    }

    Ok(image_files)
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    match ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("invalid progress template: {}", e),
    }
    pb
}

fn run_one<C: ImageCodec + ?Sized>(
    codec: &C,
    path: &Path,
    request: &ProcessingRequest,
    progress: &ProgressBar,
) -> (PathBuf, Result<ProcessOutcome>) {
    let result = process_image(codec, path, request);
    if let Err(e) = &result {
        error!(path = %path.display(), stage = e.stage(), "{}", e);
    }
    progress.inc(1);
    (path.to_path_buf(), result)
}

/// Processes every image in `folder`. Only a folder listing failure is
/// returned as an error; per-file failures are collected in the report.
pub fn process_folder<C: ImageCodec + ?Sized>(
    codec: &C,
    folder: &Path,
    request: &ProcessingRequest,
    parallelism: Parallelism,
    show_progress: bool,
) -> Result<BatchReport> {
    let start_time = Instant::now();

    let image_files = collect_image_files(folder)?;
    if image_files.is_empty() {
        warn!(folder = %folder.display(), "no image files found");
        return Ok(BatchReport {
            results: Vec::new(),
            elapsed: start_time.elapsed(),
        });
    }
    info!(count = image_files.len(), folder = %folder.display(), "processing images");

    let progress = progress_bar(image_files.len(), show_progress);

    let results: Vec<(PathBuf, Result<ProcessOutcome>)> = match parallelism {
        Parallelism::Sequential => image_files
            .iter()
            .map(|path| run_one(codec, path, request, &progress))
            .collect(),
        Parallelism::Threads(threads) => {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| {
                    image_files
                        .par_iter()
                        .map(|path| run_one(codec, path, request, &progress))
                        .collect()
                }),
                Err(e) => {
                    warn!("failed to build thread pool, running sequentially: {}", e);
                    image_files
                        .iter()
                        .map(|path| run_one(codec, path, request, &progress))
                        .collect()
                }
            }
        }
    };

    progress.finish_and_clear();

    Ok(BatchReport {
        results,
        elapsed: start_time.elapsed(),
    })
}
