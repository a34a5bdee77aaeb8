// SPDX-License-Identifier: Apache-2.0

use carta_imaging::{sanitize_file_name, ImagePipeline, ImagingConfig, ImagingError};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tempfile::tempdir;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode png fixture");
    out
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([120, 80, 40]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    out
}

fn pipeline_in(dir: &std::path::Path) -> ImagePipeline {
    ImagePipeline::new(ImagingConfig {
        upload_dir: dir.join("menu-images"),
        ..ImagingConfig::default()
    })
}

#[test]
fn wide_image_is_normalized_to_square_jpeg() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    let stored = pipeline
        .ingest("kebap foto.png", "image/png", &png_bytes(800, 200))
        .expect("ingest");

    assert!(stored.url.starts_with("/menu-images/"));
    assert!(stored.url.ends_with("-kebapfoto.png"));
    let bytes = std::fs::read(&stored.path).expect("read artifact");
    assert_eq!(
        image::guess_format(&bytes).expect("guess format"),
        ImageFormat::Jpeg
    );
    let decoded = image::load_from_memory(&bytes).expect("decode artifact");
    assert_eq!((decoded.width(), decoded.height()), (400, 400));
}

#[test]
fn tall_image_is_normalized_to_square_jpeg() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    let stored = pipeline
        .ingest("sis.jpg", "image/jpeg", &jpeg_bytes(100, 900))
        .expect("ingest");
    let decoded = image::open(&stored.path).expect("open artifact");
    assert_eq!((decoded.width(), decoded.height()), (400, 400));
}

#[test]
fn oversized_upload_is_rejected_before_any_write() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    let six_mib = vec![0u8; 6 * 1024 * 1024];
    match pipeline.ingest("big.png", "image/png", &six_mib) {
        Err(ImagingError::PayloadTooLarge { size, max }) => {
            assert_eq!(size, 6 * 1024 * 1024);
            assert_eq!(max, 5 * 1024 * 1024);
        }
        other => panic!("expected PayloadTooLarge, got {other:?}"),
    }
    assert!(
        !dir.path().join("menu-images").exists(),
        "rejected upload must not create the destination"
    );
}

#[test]
fn gif_content_type_is_unsupported() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    match pipeline.ingest("anim.gif", "image/gif", &png_bytes(10, 10)) {
        Err(ImagingError::UnsupportedMediaType(ct)) => assert_eq!(ct, "image/gif"),
        other => panic!("expected UnsupportedMediaType, got {other:?}"),
    }
    assert!(!dir.path().join("menu-images").exists());
}

#[test]
fn declared_type_mismatch_is_a_decode_failure() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    // PNG bytes declared as JPEG must not be sniffed into acceptance.
    match pipeline.ingest("fake.jpg", "image/jpeg", &png_bytes(10, 10)) {
        Err(ImagingError::Decode(_)) => {}
        other => panic!("expected Decode, got {other:?}"),
    }
    assert!(!dir.path().join("menu-images").exists());
}

#[test]
fn truncated_image_is_a_decode_failure() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());

    let mut bytes = png_bytes(64, 64);
    bytes.truncate(20);
    match pipeline.ingest("cut.png", "image/png", &bytes) {
        Err(ImagingError::Decode(_)) => {}
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[test]
fn image_jpg_alias_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());
    pipeline
        .ingest("eski.jpg", "image/jpg", &jpeg_bytes(500, 500))
        .expect("legacy image/jpg uploads must still work");
}

#[test]
fn no_tmp_residue_after_successful_ingest() {
    let dir = tempdir().expect("tempdir");
    let pipeline = pipeline_in(dir.path());
    pipeline
        .ingest("temiz.png", "image/png", &png_bytes(50, 50))
        .expect("ingest");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("menu-images"))
        .expect("read upload dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "tmp files left behind: {leftovers:?}");
}

#[test]
fn filenames_are_sanitized() {
    assert_eq!(sanitize_file_name("köfte güveç!.png"), "kftegve.png");
    assert_eq!(sanitize_file_name("a b/c\\d.jpeg"), "abcd.jpeg");
    assert_eq!(sanitize_file_name("safe-name.webp"), "safe-name.webp");
    assert_eq!(sanitize_file_name("çğüşöı"), "");
}
