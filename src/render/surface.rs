// Phase 7: image file -> Surface (in-memory only)

use std::path::Path;

use tracing::debug;

use crate::paginate::Surface;

/// Decodes a rendered document image from disk into an RGBA surface.
///
/// Any format the `image` crate can guess from the file contents is accepted.
///
/// # Errors
/// Returns `PaginateError::RenderError` if the file cannot be opened or decoded.
pub fn load_surface(path: &Path) -> crate::error::Result<Surface> {
    let image = image::ImageReader::open(path)
        .map_err(|e| {
            crate::error::PaginateError::render(format!("{}: {e}", path.display()))
        })?
        .with_guessed_format()
        .map_err(|e| {
            crate::error::PaginateError::render(format!("{}: {e}", path.display()))
        })?
        .decode()
        .map_err(|e| {
            crate::error::PaginateError::render(format!("{}: {e}", path.display()))
        })?;

    let surface = Surface::from(image);
    debug!(
        path = %path.display(),
        width = surface.width(),
        height = surface.height(),
        "surface loaded"
    );
    Ok(surface)
}
