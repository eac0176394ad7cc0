pub mod fallback;
pub mod surface;
