// Phase 1: page geometry and break tunables (point space)

use crate::error::PaginateError;

/// Output page geometry in points (1/72 inch).
///
/// Margins are applied uniformly on all four sides, so the usable content
/// area is the page shrunk by `2 * margin` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
}

impl PageGeometry {
    /// A4 portrait (210mm x 297mm).
    pub const A4: (f64, f64) = (595.28, 841.89);
    /// US Letter portrait (8.5" x 11").
    pub const LETTER: (f64, f64) = (612.0, 792.0);
    /// US Legal portrait (8.5" x 14").
    pub const LEGAL: (f64, f64) = (612.0, 1008.0);

    pub fn new(page_width: f64, page_height: f64, margin: f64) -> Self {
        Self {
            page_width,
            page_height,
            margin,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    pub fn usable_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }

    /// Reject geometries that leave no drawable area.
    pub fn validate(&self) -> crate::error::Result<()> {
        let values = [self.page_width, self.page_height, self.margin];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PaginateError::config(format!(
                "page geometry must be finite, got {self:?}"
            )));
        }
        if self.margin < 0.0 {
            return Err(PaginateError::config(format!(
                "margin must not be negative, got {}",
                self.margin
            )));
        }
        if self.usable_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(PaginateError::config(format!(
                "margin {} leaves no usable area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        let (w, h) = Self::A4;
        Self::new(w, h, 40.0)
    }
}

/// Break-selection thresholds, all in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Maximum distance from the ideal page end at which a natural break
    /// (row boundary, region edge) is preferred over the raw height cut.
    /// Also bounds how far a page may grow past the usable height to keep a
    /// protected region whole.
    pub snap_threshold: f64,
    /// Floor below which a computed page is rejected.
    pub min_slice_height: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            snap_threshold: 120.0,
            min_slice_height: 40.0,
        }
    }
}

impl Tunables {
    pub fn validate(&self, geometry: &PageGeometry) -> crate::error::Result<()> {
        for (name, value) in [
            ("snap_threshold", self.snap_threshold),
            ("min_slice_height", self.min_slice_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PaginateError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        // The tail guard only keeps fitting regions whole when snap >= min_slice.
        if self.snap_threshold < self.min_slice_height {
            return Err(PaginateError::config(format!(
                "snap_threshold ({}) must not be smaller than min_slice_height ({})",
                self.snap_threshold, self.min_slice_height
            )));
        }
        if self.min_slice_height > geometry.usable_height() {
            return Err(PaginateError::config(format!(
                "min_slice_height ({}) exceeds usable page height ({})",
                self.min_slice_height,
                geometry.usable_height()
            )));
        }
        Ok(())
    }
}
