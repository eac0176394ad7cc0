// Phase 6: selector + slicer loop -> ordered page list

use tracing::{debug, warn};

use super::boundary::{Boundaries, Element, extract_boundaries};
use super::geometry::{PageGeometry, Tunables};
use super::mapper::CoordinateMapper;
use super::selector::{BreakSelector, PageSpan};
use super::slicer::{Page, slice_page};
use super::surface::Surface;
use crate::error::PaginateError;

/// Splits document surfaces into pages for one geometry/tunable setup.
///
/// Holds no per-run state; each call builds its own mapper and cursor, so one
/// `Paginator` can serve any number of documents one after another.
#[derive(Debug, Clone)]
pub struct Paginator {
    geometry: PageGeometry,
    tunables: Tunables,
}

impl Paginator {
    pub fn new(geometry: PageGeometry, tunables: Tunables) -> crate::error::Result<Self> {
        geometry.validate()?;
        tunables.validate(&geometry)?;
        Ok(Self { geometry, tunables })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn mapper(&self, surface: &Surface) -> crate::error::Result<CoordinateMapper> {
        CoordinateMapper::new(surface, &self.geometry)
    }

    /// Break plan for a surface of the given pixel size, without touching
    /// any pixels.
    pub fn plan(
        &self,
        width: u32,
        height: u32,
        boundaries: &Boundaries,
    ) -> crate::error::Result<Vec<PageSpan>> {
        let mapper = CoordinateMapper::for_dimensions(width, height, &self.geometry)?;
        Ok(self.spans(&mapper, boundaries).collect())
    }

    /// Measure `elements` against `surface` and paginate it.
    pub fn paginate(
        &self,
        surface: &Surface,
        elements: &[Element],
    ) -> crate::error::Result<Vec<Page>> {
        let mapper = self.mapper(surface)?;
        let boundaries = extract_boundaries(surface, elements, &mapper);
        self.assemble(surface, &mapper, &boundaries)
    }

    /// Paginate with boundaries already expressed in this run's point space.
    pub fn paginate_with_boundaries(
        &self,
        surface: &Surface,
        boundaries: &Boundaries,
    ) -> crate::error::Result<Vec<Page>> {
        let mapper = self.mapper(surface)?;
        self.assemble(surface, &mapper, boundaries)
    }

    fn spans<'b>(
        &self,
        mapper: &CoordinateMapper,
        boundaries: &'b Boundaries,
    ) -> Box<dyn Iterator<Item = PageSpan> + 'b> {
        let total = mapper.total_points();
        if total <= self.geometry.usable_height() {
            return Box::new(std::iter::once(PageSpan::new(0.0, total)));
        }
        let selector = BreakSelector::new(&self.geometry, self.tunables, boundaries, total);
        Box::new(selector.breaks())
    }

    fn assemble(
        &self,
        surface: &Surface,
        mapper: &CoordinateMapper,
        boundaries: &Boundaries,
    ) -> crate::error::Result<Vec<Page>> {
        let total = mapper.total_points();
        let mut pages: Vec<Page> = Vec::new();

        for span in self.spans(mapper, boundaries) {
            if mapper.to_pixel_row(span.start) >= surface.height() {
                // Sub-pixel tail: the previous page already reaches row H.
                debug!(start = span.start, total, "dropping span past the last pixel row");
                break;
            }
            let index = pages.len();
            match slice_page(surface, mapper, index, span) {
                Ok(page) => pages.push(page),
                Err(PaginateError::BreakSelectionDefect(msg)) => {
                    warn!(index, "{msg}; slicing the remainder as one page");
                    let rest = PageSpan::new(span.start, total);
                    pages.push(slice_page(surface, mapper, index, rest)?);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        verify_coverage(&pages, surface.height())?;
        debug!(
            pages = pages.len(),
            height = surface.height(),
            "pagination complete"
        );
        Ok(pages)
    }
}

/// Pages must tile `[0, height)` exactly, in order.
fn verify_coverage(pages: &[Page], height: u32) -> crate::error::Result<()> {
    let mut next_row = 0u32;
    for page in pages {
        if page.source_y_start != next_row {
            return Err(PaginateError::break_selection(format!(
                "page {} starts at row {}, expected {next_row}",
                page.index, page.source_y_start
            )));
        }
        next_row = page.source_y_end;
    }
    if next_row != height {
        return Err(PaginateError::break_selection(format!(
            "pages cover {next_row} of {height} rows"
        )));
    }
    Ok(())
}

/// One-shot pagination with a fresh [`Paginator`].
pub fn paginate(
    surface: &Surface,
    elements: &[Element],
    geometry: PageGeometry,
    tunables: Tunables,
) -> crate::error::Result<Vec<Page>> {
    Paginator::new(geometry, tunables)?.paginate(surface, elements)
}
