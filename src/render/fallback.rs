// Phase 7: simplified single-page rendering when pagination fails

use image::imageops::{self, FilterType};
use tracing::warn;

use crate::paginate::{CoordinateMapper, Page, PageGeometry, Surface};

/// Render the whole surface onto one page, uniformly shrunk so it fits the
/// usable area.
///
/// Used by export callers after pagination has failed. The surface is never
/// enlarged; only its height can force a reduction, since the width is
/// already locked to the usable width by the mapper.
///
/// # Errors
/// Returns `PaginateError::DegenerateSurface` for a zero-sized surface.
pub fn render_single_page(
    surface: &Surface,
    geometry: &PageGeometry,
) -> crate::error::Result<Page> {
    let mapper = CoordinateMapper::new(surface, geometry)?;
    let total = mapper.total_points();
    let usable_height = geometry.usable_height();

    let factor = if total > usable_height {
        usable_height / total
    } else {
        1.0
    };

    let image = if factor < 1.0 {
        let width = scaled_dimension(surface.width(), factor);
        let height = scaled_dimension(surface.height(), factor);
        warn!(
            from_height = surface.height(),
            to_height = height,
            "shrinking surface onto a single page"
        );
        imageops::resize(surface.image(), width, height, FilterType::Triangle)
    } else {
        surface.image().clone()
    };

    Ok(Page {
        index: 0,
        source_y_start: 0,
        source_y_end: surface.height(),
        render_height_points: total * factor,
        image,
    })
}

fn scaled_dimension(pixels: u32, factor: f64) -> u32 {
    ((f64::from(pixels) * factor).round() as u32).max(1)
}
