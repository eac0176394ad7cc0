//! Splits one continuously rendered document surface into page-sized raster
//! fragments without cutting through rows or protected blocks.
//!
//! Flow: [`boundary`] measures elements into point-space break inputs,
//! [`selector`] picks each page end, [`slicer`] copies the matching pixel
//! rows, and [`assembler`] drives the loop. [`mapper`] is the single shared
//! pixel/point transform.

pub mod assembler;
pub mod boundary;
pub mod geometry;
pub mod mapper;
pub mod selector;
pub mod slicer;
pub mod surface;

pub use assembler::{Paginator, paginate};
pub use boundary::{Boundaries, Element, ElementKind, ProtectedRegion, extract_boundaries};
pub use geometry::{PageGeometry, Tunables};
pub use mapper::CoordinateMapper;
pub use selector::{BreakSelector, Breaks, PageSpan};
pub use slicer::{Page, slice_page};
pub use surface::Surface;
