// Phase 5: point-space span -> independent raster fragment

use image::RgbaImage;
use image::imageops;
use tracing::debug;

use super::mapper::CoordinateMapper;
use super::selector::PageSpan;
use super::surface::Surface;
use crate::error::PaginateError;

/// One output page: a horizontal strip of the surface plus where it came from.
#[derive(Debug, Clone)]
pub struct Page {
    /// 0-based position in the page sequence.
    pub index: usize,
    /// First surface row (inclusive).
    pub source_y_start: u32,
    /// Last surface row (exclusive).
    pub source_y_end: u32,
    /// Height of the strip when drawn at the page's usable width.
    pub render_height_points: f64,
    pub image: RgbaImage,
}

impl Page {
    pub fn pixel_height(&self) -> u32 {
        self.source_y_end - self.source_y_start
    }
}

/// Copy the rows of `span` out of `surface` into a new page buffer.
///
/// # Errors
/// - `BreakSelectionDefect` if the span maps to zero pixel rows
/// - `SliceExtractionFailure` if the rows fall outside the surface
pub fn slice_page(
    surface: &Surface,
    mapper: &CoordinateMapper,
    index: usize,
    span: PageSpan,
) -> crate::error::Result<Page> {
    let y_start = mapper.to_pixel_row(span.start);
    let y_end = mapper.to_pixel_row(span.end);

    if y_end <= y_start {
        return Err(PaginateError::break_selection(format!(
            "page {index} span [{:.3}, {:.3}) maps to empty pixel range {y_start}..{y_end}",
            span.start, span.end
        )));
    }
    if y_end > surface.height() {
        return Err(PaginateError::slice_extraction(format!(
            "page {index} rows {y_start}..{y_end} exceed surface height {}",
            surface.height()
        )));
    }

    let height = y_end - y_start;
    let image = imageops::crop_imm(surface.image(), 0, y_start, surface.width(), height).to_image();
    if image.height() != height || image.width() != surface.width() {
        return Err(PaginateError::slice_extraction(format!(
            "page {index} copied {}x{} pixels, expected {}x{height}",
            image.width(),
            image.height(),
            surface.width()
        )));
    }

    let render_height_points = mapper.to_point(f64::from(height));
    debug!(index, y_start, y_end, render_height_points, "page sliced");

    Ok(Page {
        index,
        source_y_start: y_start,
        source_y_end: y_end,
        render_height_points,
        image,
    })
}
