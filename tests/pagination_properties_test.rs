//! Property-based tests over generated quotation layouts: a header, a run of
//! table rows, then optional terms, closing and footer blocks.
//!
//! Each case also draws the surface width, the page margin and the break
//! thresholds, so the pixel-to-point scale is rarely a whole number and the
//! tunables cover the whole range `Tunables::validate` accepts.

use doc_pager::paginate::{Element, ElementKind, Page, PageGeometry, Surface, Tunables, paginate};
use image::RgbaImage;
use proptest::prelude::*;

/// Float slack for comparisons made across the point/pixel boundary.
const EPS: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Setup {
    width: u32,
    geometry: PageGeometry,
    tunables: Tunables,
}

impl Setup {
    /// Points per surface pixel.
    fn scale(&self) -> f64 {
        self.geometry.usable_width() / f64::from(self.width)
    }
}

fn setup_strategy() -> impl Strategy<Value = Setup> {
    (40u32..400, 20.0f64..80.0, 0.0f64..200.0, 0.0f64..200.0).prop_map(
        |(width, margin, min_slice, snap_extra)| {
            let (page_width, page_height) = PageGeometry::A4;
            Setup {
                width,
                geometry: PageGeometry::new(page_width, page_height, margin),
                tunables: Tunables {
                    snap_threshold: min_slice + snap_extra,
                    min_slice_height: min_slice,
                },
            }
        },
    )
}

#[derive(Debug, Clone)]
struct Layout {
    height: u32,
    elements: Vec<Element>,
    regions: Vec<(u32, u32)>,
}

fn layout_strategy() -> impl Strategy<Value = Layout> {
    (
        20u32..200,
        prop::collection::vec(10u32..120, 0..60),
        prop::option::of(30u32..1200),
        prop::option::of(30u32..300),
        prop::option::of(30u32..200),
    )
        .prop_map(|(header, rows, terms, closing, footer)| {
            let mut y = header;
            let mut elements = Vec::new();
            let mut regions = Vec::new();
            for h in rows {
                elements.push(Element::new(ElementKind::Row, f64::from(y), f64::from(h)));
                y += h;
            }
            for (kind, block) in [
                (ElementKind::Terms, terms),
                (ElementKind::Closing, closing),
                (ElementKind::Footer, footer),
            ] {
                if let Some(h) = block {
                    elements.push(Element::new(kind, f64::from(y), f64::from(h)));
                    regions.push((y, y + h));
                    y += h;
                }
            }
            Layout {
                height: y,
                elements,
                regions,
            }
        })
}

fn run(setup: &Setup, layout: &Layout) -> Vec<Page> {
    let surface = Surface::new(RgbaImage::new(setup.width, layout.height));
    paginate(&surface, &layout.elements, setup.geometry, setup.tunables)
        .expect("pagination should succeed")
}

fn rows(pages: &[Page]) -> Vec<(u32, u32)> {
    pages
        .iter()
        .map(|p| (p.source_y_start, p.source_y_end))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: pages tile [0, H) in order with no gaps or overlaps.
    #[test]
    fn prop_pages_cover_surface_exactly(setup in setup_strategy(), layout in layout_strategy()) {
        let pages = run(&setup, &layout);
        let mut next = 0;
        for (i, page) in pages.iter().enumerate() {
            prop_assert_eq!(page.index, i);
            prop_assert_eq!(page.source_y_start, next);
            prop_assert!(page.source_y_end > page.source_y_start);
            prop_assert_eq!(page.image.height(), page.pixel_height());
            prop_assert_eq!(page.image.width(), setup.width);
            next = page.source_y_end;
        }
        prop_assert_eq!(next, layout.height);
    }

    /// Property: every protected block that fits on a page lands on one page.
    ///
    /// Only checked when the floor is at least one pixel; below that a page
    /// may round to zero rows and take the remainder fallback.
    #[test]
    fn prop_fitting_regions_are_never_split(setup in setup_strategy(), layout in layout_strategy()) {
        let scale = setup.scale();
        if setup.tunables.min_slice_height < scale {
            return Ok(());
        }
        let pages = run(&setup, &layout);
        let usable = setup.geometry.usable_height();
        for &(start, end) in &layout.regions {
            if f64::from(end - start) * scale > usable - EPS {
                continue;
            }
            prop_assert!(
                pages.iter().any(|p| p.source_y_start <= start && end <= p.source_y_end),
                "region {}..{} split across pages {:?}",
                start,
                end,
                rows(&pages)
            );
        }
    }

    /// Property: no page is shorter than the minimum slice height, give or
    /// take the one pixel lost to rounding both ends to whole rows.
    #[test]
    fn prop_pages_respect_min_slice(setup in setup_strategy(), layout in layout_strategy()) {
        let pages = run(&setup, &layout);
        let slack = setup.scale() + EPS;
        let floor = setup.tunables.min_slice_height;
        for page in &pages {
            prop_assert!(
                page.render_height_points + slack >= floor || pages.len() == 1,
                "page {} is only {}pt tall (floor {}pt, pages {:?})",
                page.index,
                page.render_height_points,
                floor,
                rows(&pages)
            );
        }
    }

    /// Property: identical inputs give identical break sequences.
    #[test]
    fn prop_pagination_is_deterministic(setup in setup_strategy(), layout in layout_strategy()) {
        let first = run(&setup, &layout);
        let second = run(&setup, &layout);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.source_y_start, b.source_y_start);
            prop_assert_eq!(a.source_y_end, b.source_y_end);
            prop_assert_eq!(
                a.render_height_points.to_bits(),
                b.render_height_points.to_bits()
            );
        }
    }

    /// Property: a surface no taller than the usable height is one page.
    #[test]
    fn prop_short_surface_is_single_page(
        setup in setup_strategy(),
        fraction in 0.01f64..1.0,
        row_count in 0u32..20,
    ) {
        let max_rows = setup.geometry.usable_height() / setup.scale();
        let height = ((max_rows * fraction).floor() as u32).max(1);
        let elements: Vec<Element> = (0..row_count)
            .map(|i| Element::new(ElementKind::Row, f64::from(i * 30), 30.0))
            .collect();
        let surface = Surface::new(RgbaImage::new(setup.width, height));
        let pages = paginate(&surface, &elements, setup.geometry, setup.tunables)
            .expect("pagination should succeed");
        prop_assert_eq!(pages.len(), 1);
        prop_assert_eq!(pages[0].source_y_end, height);
    }
}
