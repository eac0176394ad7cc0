use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Degenerate surface: {0}")]
    DegenerateSurface(String),

    #[error("Break selection defect: {0}")]
    BreakSelectionDefect(String),

    #[error("Slice extraction failure: {0}")]
    SliceExtractionFailure(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Encode error: {0}")]
    EncodeError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PaginateError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PaginateError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a degenerate surface error.
    degenerate_surface => DegenerateSurface,
    /// Create a break selection defect.
    break_selection => BreakSelectionDefect,
    /// Create a slice extraction failure.
    slice_extraction => SliceExtractionFailure,
    /// Create a render error.
    render => RenderError,
    /// Create an encode error.
    encode => EncodeError,
    /// Create a manifest error.
    manifest => ManifestError,
}

impl From<serde_json::Error> for PaginateError {
    fn from(e: serde_json::Error) -> Self {
        Self::ManifestError(e.to_string())
    }
}

impl From<serde_yml::Error> for PaginateError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for PaginateError {
    fn from(e: image::ImageError) -> Self {
        Self::EncodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaginateError>;
