mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::{create_nested_directory_structure, create_test_image_files, list_names, write_image};
use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use predicates::prelude::*;

fn img_batch() -> Command {
    Command::cargo_bin("img-batch").unwrap()
}

#[test]
fn test_cli_help() {
    img_batch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--size"))
        .stdout(predicate::str::contains("--blur"));
}

#[test]
fn test_missing_folder_fails() {
    let temp = TempDir::new().unwrap();
    let output = temp.child("out");

    img_batch()
        .args(["-f", &temp.child("missing").path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot process folder"));

    // The output directory is created before the folder is read.
    output.assert(predicate::path::is_dir());
}

#[test]
fn test_unwritable_output_directory_fails() {
    let temp = TempDir::new().unwrap();
    temp.child("taken").write_str("a file, not a directory").unwrap();
    temp.child("in").create_dir_all().unwrap();

    img_batch()
        .args(["-f", &temp.child("in").path().to_string_lossy()])
        .args(["-o", &temp.child("taken/out").path().to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot prepare output directory"));
}

#[test]
fn test_invalid_format_is_usage_error() {
    img_batch().args(["-F", "tiff"]).assert().code(2);
}

#[test]
fn test_invalid_quality_is_usage_error() {
    img_batch().args(["-q", "150"]).assert().code(2);
}

#[test]
fn test_non_images_are_skipped() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    input.create_dir_all().unwrap();
    input.child("notes.txt").write_str("hello").unwrap();
    write_image(input.path(), "a.png", 24, 24, ImageFormat::Png);
    let output = temp.child("out");

    img_batch()
        .args(["-f", &input.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 processed, 0 failed"));

    assert_eq!(list_names(output.path()), vec!["a.png".to_string()]);
}

#[test]
fn test_blur_and_size_ceiling() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("img");
    input.create_dir_all().unwrap();
    write_image(input.path(), "photo.JPG", 512, 512, ImageFormat::Jpeg);
    let output = temp.child("img_out");

    // Too small for any quality at 512x512, so the fit must step quality
    // down to the floor and then shrink.
    img_batch()
        .current_dir(temp.path())
        .args(["--blur", "1", "--size", "4"])
        .assert()
        .success();

    let written = output.child("photo_blurred_and_compressed.jpg");
    written.assert(predicate::path::is_file());

    let bytes = std::fs::read(written.path()).unwrap();
    assert!(bytes.len() <= 4 * 1024);
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

    let (width, height) = image::image_dimensions(written.path()).unwrap();
    assert!(width < 512 && height < 512);
    assert_eq!(width, height);
}

#[test]
fn test_size_ceiling_reached_by_quality_alone() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    input.create_dir_all().unwrap();
    let source = write_image(input.path(), "photo.jpg", 256, 256, ImageFormat::Jpeg);
    let output = temp.child("out");

    // The quality-10 encode of the source fits, so no shrink is needed.
    let pixels = image::load_from_memory(&std::fs::read(&source).unwrap()).unwrap();
    let mut floor = Vec::new();
    pixels
        .write_with_encoder(JpegEncoder::new_with_quality(&mut floor, 10))
        .unwrap();
    let size_kb = (floor.len() as u64).div_ceil(1024);

    img_batch()
        .args(["-f", &input.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .args(["-s", &size_kb.to_string()])
        .assert()
        .success();

    let written = output.child("photo_compressed.jpg");
    let bytes = std::fs::read(written.path()).unwrap();
    assert!(bytes.len() as u64 <= size_kb * 1024);
    assert_eq!(image::image_dimensions(written.path()).unwrap(), (256, 256));
}

#[test]
fn test_per_file_failure_keeps_exit_code() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    input.create_dir_all().unwrap();
    input.child("broken.jpg").write_binary(b"not really a jpeg").unwrap();
    write_image(input.path(), "good.jpg", 20, 20, ImageFormat::Jpeg);
    let output = temp.child("out");

    img_batch()
        .args(["-f", &input.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .args(["-q", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.jpg"))
        .stdout(predicate::str::contains("1 processed, 1 failed"));

    assert_eq!(list_names(output.path()), vec!["good.jpg".to_string()]);
}

#[test]
fn test_format_override_and_suffix() {
    let temp = TempDir::new().unwrap();
    create_test_image_files(temp.path());
    let output = temp.child("out");

    img_batch()
        .args(["-f", &temp.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .args(["-F", "webp", "-n", "web", "-b", "1"])
        .assert()
        .success();

    // Both inputs share the stem "test"; the later one wins.
    assert_eq!(list_names(output.path()), vec!["test_web.webp".to_string()]);
    let bytes = std::fs::read(output.child("test_web.webp").path()).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
}

#[test]
fn test_gif_keeps_original_extension() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    input.create_dir_all().unwrap();
    write_image(input.path(), "anim.GIF", 16, 16, ImageFormat::Gif);
    let output = temp.child("out");

    img_batch()
        .args(["-f", &input.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .args(["-s", "100"])
        .assert()
        .success();

    output
        .child("anim_compressed.GIF")
        .assert(predicate::path::is_file());
}

#[test]
fn test_subdirectories_are_not_processed() {
    let temp = TempDir::new().unwrap();
    create_nested_directory_structure(temp.path());
    let output = temp.child("out");

    img_batch()
        .args(["-f", &temp.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .assert()
        .success();

    assert!(list_names(output.path()).is_empty());
}

#[test]
fn test_parallel_jobs_process_everything() {
    let temp = TempDir::new().unwrap();
    let input = temp.child("in");
    input.create_dir_all().unwrap();
    for name in ["a.jpg", "b.jpg", "c.png", "d.png"] {
        let format = if name.ends_with("png") {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        };
        write_image(input.path(), name, 16, 16, format);
    }
    let output = temp.child("out/nested");

    img_batch()
        .args(["-f", &input.path().to_string_lossy()])
        .args(["-o", &output.path().to_string_lossy()])
        .args(["-j", "3", "-q", "60", "--quiet"])
        .assert()
        .success();

    assert_eq!(
        list_names(output.path()),
        vec!["a.jpg", "b.jpg", "c.png", "d.png"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}
