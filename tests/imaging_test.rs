//! End-to-end compressor tests over synthesized images: decode, two-pass
//! bounded resize, JPEG re-encode.
//!
//! Run with: `cargo test --test imaging_test`

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat, RgbImage};

use talent_backend::imaging::{CompressionOptions, ImagingError, compress};

/// A solid-color PNG of the given dimensions.
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 40, 200]),
    ));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn options(max_width: u32, max_height: u32) -> CompressionOptions {
    CompressionOptions {
        max_width,
        max_height,
        quality: 80,
    }
}

#[test]
fn output_is_jpeg_with_the_original_name() {
    let out = compress(&png_bytes(50, 50), "headshot.png", options(120, 120)).unwrap();
    assert_eq!(out.file_name, "headshot.png");
    assert_eq!(
        image::guess_format(&out.data).unwrap(),
        ImageFormat::Jpeg
    );
}

#[test]
fn small_images_keep_their_dimensions() {
    let out = compress(&png_bytes(80, 60), "a.png", options(120, 120)).unwrap();
    let decoded = image::load_from_memory(&out.data).unwrap();
    assert_eq!(decoded.dimensions(), (80, 60));
}

#[test]
fn wide_images_are_bounded_by_the_width_pass() {
    let out = compress(&png_bytes(240, 60), "a.png", options(120, 120)).unwrap();
    let decoded = image::load_from_memory(&out.data).unwrap();
    assert_eq!(decoded.dimensions(), (120, 30));
}

#[test]
fn tall_images_are_bounded_by_the_second_pass() {
    // Width pass is a no-op; the height pass must still bring height under
    // the bound.
    let out = compress(&png_bytes(30, 480), "a.png", options(120, 120)).unwrap();
    let decoded = image::load_from_memory(&out.data).unwrap();
    let (w, h) = decoded.dimensions();
    assert_eq!(h, 120);
    assert!(w <= 120);
}

#[test]
fn two_pass_fit_can_undershoot_the_width_bound() {
    // 240x300 -> width pass gives 120x150 -> height pass gives 96x120.
    // The final width is below max_width; that is the documented policy.
    let out = compress(&png_bytes(240, 300), "a.png", options(120, 120)).unwrap();
    let decoded = image::load_from_memory(&out.data).unwrap();
    assert_eq!(decoded.dimensions(), (96, 120));
}

#[test]
fn non_image_bytes_are_rejected() {
    let err = compress(b"definitely not pixels", "a.txt", options(120, 120)).unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
}
