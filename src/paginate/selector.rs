// Phase 4: break selection (cursor -> next page end)

use tracing::debug;

use super::boundary::{Boundaries, ProtectedRegion};
use super::geometry::{PageGeometry, Tunables};

/// A half-open point-space span `[start, end)` of the surface that becomes
/// one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpan {
    pub start: f64,
    pub end: f64,
}

impl PageSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn height(&self) -> f64 {
        self.end - self.start
    }

    /// True when the whole region lies inside this span.
    pub fn contains(&self, region: &ProtectedRegion) -> bool {
        self.start <= region.start && region.end <= self.end
    }
}

/// Chooses where each page ends, given the surface height in points and the
/// run's boundaries.
///
/// Selection is a pure function of the cursor: the same inputs always yield
/// the same break sequence.
#[derive(Debug, Clone)]
pub struct BreakSelector<'a> {
    usable_height: f64,
    total: f64,
    tunables: Tunables,
    candidates: &'a [f64],
    regions: &'a [ProtectedRegion],
}

impl<'a> BreakSelector<'a> {
    pub fn new(
        geometry: &PageGeometry,
        tunables: Tunables,
        boundaries: &'a Boundaries,
        total: f64,
    ) -> Self {
        Self {
            usable_height: geometry.usable_height(),
            total,
            tunables,
            candidates: boundaries.break_candidates(),
            regions: boundaries.protected_regions(),
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Page end for a page starting at `cursor`. Always `> cursor` and
    /// `<= total` while `cursor < total`.
    pub fn next_break(&self, cursor: f64) -> f64 {
        let usable = self.usable_height;
        let snap = self.tunables.snap_threshold;
        let min_slice = self.tunables.min_slice_height;
        let ideal_end = cursor + usable;

        if ideal_end >= self.total {
            return self.total;
        }

        let mut page_end = ideal_end;
        if let Some(candidate) = self.candidate_within(cursor, ideal_end)
            && ideal_end - candidate <= snap
            && candidate - cursor >= min_slice
        {
            page_end = candidate;
        }

        page_end = self.protect_regions(cursor, ideal_end, page_end);

        if page_end - cursor < min_slice {
            debug!(cursor, page_end, "slice below floor, using full page height");
            page_end = ideal_end;
        }

        // Never leave a trailing sliver shorter than the floor.
        let tail = self.total - page_end;
        if tail > 0.0 && tail < min_slice {
            page_end = if self.total - cursor <= usable + snap {
                self.total
            } else {
                self.shorten_for_tail(cursor)
            };
        }

        let page_end = page_end.min(self.total);
        if page_end > cursor {
            page_end
        } else {
            // Unreachable with validated inputs; keep progress guaranteed.
            ideal_end.min(self.total)
        }
    }

    /// Lazy sequence of page spans covering `[0, total)`.
    pub fn breaks(&self) -> Breaks<'a> {
        Breaks {
            selector: self.clone(),
            cursor: 0.0,
        }
    }

    /// Greatest candidate in `(cursor, ideal_end]`.
    fn candidate_within(&self, cursor: f64, ideal_end: f64) -> Option<f64> {
        let upto = self.candidates.partition_point(|&c| c <= ideal_end);
        self.candidates[..upto]
            .last()
            .copied()
            .filter(|&c| c > cursor)
    }

    /// End a page early enough that the remainder reaches the slice floor.
    ///
    /// A region the shortened end would cut is deferred when that leaves a
    /// full-floor page; a region that fits on a page but starts too close to
    /// the cursor to defer takes the tail onto this page instead.
    fn shorten_for_tail(&self, cursor: f64) -> f64 {
        let min_slice = self.tunables.min_slice_height;
        let shortened = self.total - min_slice;
        match self
            .regions
            .iter()
            .find(|r| r.start >= cursor && r.bisected_by(shortened))
        {
            Some(region) if region.start - cursor >= min_slice => region.start,
            Some(region) if region.height() <= self.usable_height => self.total,
            _ => shortened,
        }
    }

    /// Move `page_end` off any protected region it would cut.
    ///
    /// Regions already started on an earlier page are not reconsidered. Each
    /// pass handles the earliest cut region; the loop stops as soon as a
    /// pass leaves `page_end` unchanged.
    fn protect_regions(&self, cursor: f64, ideal_end: f64, mut page_end: f64) -> f64 {
        let usable = self.usable_height;
        let snap = self.tunables.snap_threshold;
        let min_slice = self.tunables.min_slice_height;

        for _ in 0..=self.regions.len() {
            let Some(region) = self
                .regions
                .iter()
                .find(|r| r.start >= cursor && r.bisected_by(page_end))
            else {
                break;
            };

            let lead = region.start - cursor;
            let adjusted = if region.end <= ideal_end + snap {
                // Fits on this page, at most `snap` past the usable height.
                region.end
            } else if ideal_end - region.start <= snap && lead >= min_slice.max(usable / 2.0) {
                // Starts late on the page: defer it whole.
                region.start
            } else if region.height() <= usable && lead >= min_slice {
                region.start
            } else {
                // Taller than a page: split it.
                page_end
            };

            debug!(
                cursor,
                region_start = region.start,
                region_end = region.end,
                from = page_end,
                to = adjusted,
                "protected region override"
            );

            if adjusted == page_end {
                break;
            }
            page_end = adjusted;
        }

        page_end
    }
}

/// Iterator over the page spans chosen by a [`BreakSelector`].
///
/// Finite; restarting means calling [`BreakSelector::breaks`] again.
pub struct Breaks<'a> {
    selector: BreakSelector<'a>,
    cursor: f64,
}

impl Iterator for Breaks<'_> {
    type Item = PageSpan;

    fn next(&mut self) -> Option<PageSpan> {
        if self.cursor >= self.selector.total {
            return None;
        }
        let end = self.selector.next_break(self.cursor);
        let span = PageSpan::new(self.cursor, end);
        self.cursor = end;
        Some(span)
    }
}
