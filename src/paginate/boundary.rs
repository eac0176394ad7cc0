// Phase 3: element extents -> break candidates + protected regions

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mapper::CoordinateMapper;
use super::surface::Surface;

/// Logical building blocks a document surface is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// One itemized table row; the smallest atomic unit.
    Row,
    /// Trailing company-info footer.
    Footer,
    /// Terms-and-conditions prose.
    Terms,
    /// Closing / signature block.
    Closing,
}

/// A sub-element of the surface with its measured vertical extent in pixels,
/// relative to the surface's top edge. Missing measurements are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl Element {
    pub fn new(kind: ElementKind, top: f64, height: f64) -> Self {
        Self {
            kind,
            top: Some(top),
            height: Some(height),
        }
    }

    /// Pixel extent `(top, bottom)` clipped to the surface, or `None` when the
    /// element cannot be measured.
    fn pixel_extent(&self, surface_height: u32) -> Option<(f64, f64)> {
        let top = self.top?;
        let height = self.height?;
        if !top.is_finite() || !height.is_finite() || height <= 0.0 {
            return None;
        }
        let limit = f64::from(surface_height);
        let top = top.max(0.0);
        if top >= limit {
            return None;
        }
        let bottom = (top + height).min(limit);
        (bottom > top).then_some((top, bottom))
    }
}

/// A point-space span that should stay on a single page when it fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtectedRegion {
    pub start: f64,
    pub end: f64,
}

impl ProtectedRegion {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn height(&self) -> f64 {
        self.end - self.start
    }

    /// True when `y` falls strictly inside the region.
    pub fn bisected_by(&self, y: f64) -> bool {
        self.start < y && y < self.end
    }
}

/// Normalized break inputs for one run, all in point space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundaries {
    break_candidates: Vec<f64>,
    protected_regions: Vec<ProtectedRegion>,
}

impl Boundaries {
    /// Normalize raw point-space lists against a surface of `total` points.
    ///
    /// Candidates are sorted, deduplicated and limited to `(0, total)`.
    /// Regions are clipped to `[0, total]`, empty ones dropped, and the rest
    /// ordered by start.
    pub fn from_points(
        candidates: impl IntoIterator<Item = f64>,
        regions: impl IntoIterator<Item = ProtectedRegion>,
        total: f64,
    ) -> Self {
        let mut break_candidates: Vec<f64> = candidates
            .into_iter()
            .filter(|&y| y.is_finite() && y > 0.0 && y < total)
            .collect();
        break_candidates.sort_by(f64::total_cmp);
        break_candidates.dedup();

        let mut protected_regions: Vec<ProtectedRegion> = regions
            .into_iter()
            .filter(|r| r.start.is_finite() && r.end.is_finite())
            .map(|r| ProtectedRegion::new(r.start.max(0.0), r.end.min(total)))
            .filter(|r| r.end > r.start)
            .collect();
        protected_regions.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)));
        protected_regions.dedup();

        Self {
            break_candidates,
            protected_regions,
        }
    }

    pub fn break_candidates(&self) -> &[f64] {
        &self.break_candidates
    }

    pub fn protected_regions(&self) -> &[ProtectedRegion] {
        &self.protected_regions
    }

    pub fn is_empty(&self) -> bool {
        self.break_candidates.is_empty() && self.protected_regions.is_empty()
    }
}

/// Derive break candidates and protected regions from measured elements.
///
/// Rows contribute their bottom edge, the footer contributes its top edge
/// plus its own extent as a region, and terms/closing blocks contribute
/// regions. Elements that cannot be measured are skipped silently.
pub fn extract_boundaries(
    surface: &Surface,
    elements: &[Element],
    mapper: &CoordinateMapper,
) -> Boundaries {
    let mut candidates = Vec::new();
    let mut regions = Vec::new();
    let mut skipped = 0usize;

    for element in elements {
        let Some((top, bottom)) = element.pixel_extent(surface.height()) else {
            skipped += 1;
            continue;
        };
        let (start, end) = (mapper.to_point(top), mapper.to_point(bottom));
        match element.kind {
            ElementKind::Row => candidates.push(end),
            ElementKind::Footer => {
                candidates.push(start);
                regions.push(ProtectedRegion::new(start, end));
            }
            ElementKind::Terms | ElementKind::Closing => {
                regions.push(ProtectedRegion::new(start, end));
            }
        }
    }

    let boundaries = Boundaries::from_points(candidates, regions, mapper.total_points());
    debug!(
        elements = elements.len(),
        skipped,
        candidates = boundaries.break_candidates.len(),
        regions = boundaries.protected_regions.len(),
        "boundaries extracted"
    );
    boundaries
}
