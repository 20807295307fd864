use anyhow::{Context, Result};
use clap::Parser;
use img_batch::batch::{process_folder, BatchReport, Parallelism};
use img_batch::cli::Args;
use img_batch::codec::RasterCodec;
use img_batch::logger;
use img_batch::utils::{calculate_compression_ratio, ensure_output_dir, format_file_size};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet);

    let request = args.to_request().context("invalid arguments")?;

    ensure_output_dir(&request.output_dir).context("cannot prepare output directory")?;

    let report = process_folder(
        &RasterCodec::new(),
        &args.folder,
        &request,
        Parallelism::from_jobs(args.jobs),
        !args.quiet,
    )
    .with_context(|| format!("cannot process folder {}", args.folder.display()))?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    for outcome in report.succeeded() {
        println!(
            "✅ {} -> {} ({} -> {})",
            outcome.input.display(),
            outcome.output.display(),
            format_file_size(outcome.original_size),
            format_file_size(outcome.written_size)
        );
    }
    for (path, err) in report.failed() {
        println!("❌ {} [{}]: {}", path.display(), err.stage(), err);
    }

    let before = report.total_original_size();
    let after = report.total_written_size();
    info!(
        processed = report.succeeded_count(),
        failed = report.failed_count(),
        elapsed = ?report.elapsed,
        "batch complete"
    );
    println!(
        "📊 {} processed, {} failed, {} -> {} ({:.1}% smaller)",
        report.succeeded_count(),
        report.failed_count(),
        format_file_size(before),
        format_file_size(after),
        calculate_compression_ratio(before, after)
    );
}
