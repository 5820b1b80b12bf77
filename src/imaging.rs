//! Image compression applied to every upload before it reaches the bucket.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageOutputFormat, imageops::FilterType};

/// Inputs larger than this are rejected before compression is attempted.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct CompressionOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 1200,
            quality: 80,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("could not decode image: {0}")]
    Decode(image::ImageError),
    #[error("could not encode image: {0}")]
    Encode(image::ImageError),
    #[error("encoder produced no data")]
    EmptyOutput,
}

/// A re-encoded upload. The original file name is preserved so the object
/// path in the bucket matches what the user selected.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub file_name: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Bound `(width, height)` to the given maxima in two sequential passes:
/// width is shrunk first (scaling height along), then height is shrunk if it
/// still exceeds its bound. This is deliberately not a single best-fit scale;
/// a very tall image can end up narrower than `max_width` after the second
/// pass, and callers rely on that exact behavior.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (mut w, mut h) = (width as f64, height as f64);
    if w > max_width as f64 {
        h = h * max_width as f64 / w;
        w = max_width as f64;
    }
    if h > max_height as f64 {
        w = w * max_height as f64 / h;
        h = max_height as f64;
    }
    (w.round().max(1.0) as u32, h.round().max(1.0) as u32)
}

/// Decode `bytes`, resize to fit the configured bounds, and re-encode as
/// JPEG at the configured quality.
pub fn compress(
    bytes: &[u8],
    file_name: &str,
    options: CompressionOptions,
) -> Result<CompressedImage, ImagingError> {
    let img = image::load_from_memory(bytes).map_err(ImagingError::Decode)?;
    let (width, height) = fit_dimensions(
        img.width(),
        img.height(),
        options.max_width,
        options.max_height,
    );

    let resized = if (width, height) != img.dimensions() {
        img.resize_exact(width, height, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel; flatten to RGB before encoding.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut data = Vec::new();
    rgb.write_to(
        &mut Cursor::new(&mut data),
        ImageOutputFormat::Jpeg(options.quality),
    )
    .map_err(ImagingError::Encode)?;

    if data.is_empty() {
        return Err(ImagingError::EmptyOutput);
    }

    Ok(CompressedImage {
        file_name: file_name.to_string(),
        data,
        width,
        height,
    })
}
