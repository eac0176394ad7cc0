// Phase 2: pixel space <-> point space

use tracing::debug;

use super::geometry::PageGeometry;
use super::surface::Surface;
use crate::error::PaginateError;

/// Width-locked transform between the surface's pixel rows and output points.
///
/// The surface is scaled so its full width fills the usable page width, so a
/// single factor `s = usable_width / W` applies to both axes. Every component
/// of a run shares one mapper; nothing else derives `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale: f64,
    surface_height: u32,
}

impl CoordinateMapper {
    pub fn new(surface: &Surface, geometry: &PageGeometry) -> crate::error::Result<Self> {
        Self::for_dimensions(surface.width(), surface.height(), geometry)
    }

    /// Build a mapper from surface dimensions alone (no pixel data needed).
    ///
    /// # Errors
    /// Returns `PaginateError::DegenerateSurface` when either dimension is zero.
    pub fn for_dimensions(
        width: u32,
        height: u32,
        geometry: &PageGeometry,
    ) -> crate::error::Result<Self> {
        if width == 0 || height == 0 {
            return Err(PaginateError::degenerate_surface(format!(
                "surface is {width}x{height} pixels"
            )));
        }
        let scale = geometry.usable_width() / f64::from(width);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PaginateError::config(format!(
                "usable width {} yields invalid scale",
                geometry.usable_width()
            )));
        }
        debug!(width, height, scale, "coordinate mapper ready");
        Ok(Self {
            scale,
            surface_height: height,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_point(&self, pixel_y: f64) -> f64 {
        pixel_y * self.scale
    }

    pub fn to_pixel(&self, point_y: f64) -> f64 {
        point_y / self.scale
    }

    /// Nearest pixel row for a point-space position, clamped to `[0, H]`.
    ///
    /// Rounding is the only place point positions become integers, so equal
    /// point inputs always land on the same row.
    pub fn to_pixel_row(&self, point_y: f64) -> u32 {
        let row = self.to_pixel(point_y).round();
        if row <= 0.0 {
            0
        } else if row >= f64::from(self.surface_height) {
            self.surface_height
        } else {
            row as u32
        }
    }

    /// Height of the whole surface in points (`H * s`).
    pub fn total_points(&self) -> f64 {
        self.to_point(f64::from(self.surface_height))
    }
}
