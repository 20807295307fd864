#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, RgbImage};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Noisy content so lossy encoders cannot collapse it to nothing.
pub fn noisy_image(width: u32, height: u32) -> DynamicImage {
    let mut state: u32 = 0x1234_5678;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    noisy_image(width, height)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encoded_image(width, height, format)).unwrap();
    path
}

pub fn create_test_image_files(temp_dir: &Path) -> Vec<PathBuf> {
    let jpg_file = write_image(temp_dir, "test.jpg", 32, 32, ImageFormat::Jpeg);
    let png_file = write_image(temp_dir, "test.png", 32, 32, ImageFormat::Png);
    let txt_file = temp_dir.join("notes.txt");

    File::create(&txt_file)
        .unwrap()
        .write_all(b"not an image")
        .unwrap();

    vec![jpg_file, png_file, txt_file]
}

pub fn create_nested_directory_structure(temp_dir: &Path) -> PathBuf {
    let subdir = temp_dir.join("subdir");
    std::fs::create_dir(&subdir).unwrap();
    write_image(&subdir, "nested.jpg", 16, 16, ImageFormat::Jpeg);
    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
