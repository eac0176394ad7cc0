// Phase 8: image crate: page fragment -> PNG/JPEG bytes

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};

use crate::config::job::OutputFormat;
use crate::error::PaginateError;

/// Encode a page fragment in the requested format.
///
/// PNG keeps the alpha channel. JPEG drops it and compresses with the
/// specified quality (1-100); `quality` is ignored for PNG.
pub fn encode_page(
    image: &RgbaImage,
    format: OutputFormat,
    quality: u8,
) -> crate::error::Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpeg => encode_jpeg(image, quality),
    }
}

fn encode_png(image: &RgbaImage) -> crate::error::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(buf.into_inner())
}

fn encode_jpeg(image: &RgbaImage, quality: u8) -> crate::error::Result<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(PaginateError::encode(format!(
            "JPEG quality must be 1-100, got {}",
            quality
        )));
    }

    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)?;

    Ok(buf.into_inner())
}
