use std::path::Path;

use serde::Deserialize;

use super::job::{OutputFormat, PageSize};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: PageSize,
    pub margin: f64,
    pub snap_threshold: f64,
    pub min_slice_height: f64,
    pub output_format: OutputFormat,
    pub jpeg_quality: u8,
    pub fallback_single_page: bool,
    pub write_manifest: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            page_size: PageSize::default(),
            margin: 40.0,
            snap_threshold: 120.0,
            min_slice_height: 40.0,
            output_format: OutputFormat::Png,
            jpeg_quality: 85,
            fallback_single_page: true,
            write_manifest: true,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::PaginateError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
