use image::{DynamicImage, RgbaImage};

use crate::error::PaginateError;

/// A single continuous rendering of a whole document, prior to pagination.
///
/// The paginator only ever borrows a surface; slicing copies rows out into
/// independent page buffers.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Build a surface from raw RGBA pixel data (4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> crate::error::Result<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or_else(|| {
                PaginateError::render(format!(
                    "Overflow computing buffer size for {}x{} RGBA surface",
                    width, height
                ))
            })?;

        if pixels.len() != expected_len {
            return Err(PaginateError::render(format!(
                "RGBA data size mismatch: expected {} bytes, got {}",
                expected_len,
                pixels.len()
            )));
        }

        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| PaginateError::render("Failed to create surface from RGBA data"))?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<DynamicImage> for Surface {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }
}

impl From<RgbaImage> for Surface {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}
