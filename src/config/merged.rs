use super::job::{Job, OutputFormat, PageSize};
use super::settings::Settings;
use crate::paginate::{PageGeometry, Tunables};

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub page_size: PageSize,
    pub margin: f64,
    pub snap_threshold: f64,
    pub min_slice_height: f64,
    pub output_format: OutputFormat,
    pub jpeg_quality: u8,
    pub fallback_single_page: bool,
    pub write_manifest: bool,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            page_size: job.page_size.unwrap_or(settings.page_size),
            margin: job.margin.unwrap_or(settings.margin),
            snap_threshold: job.snap_threshold.unwrap_or(settings.snap_threshold),
            min_slice_height: job.min_slice_height.unwrap_or(settings.min_slice_height),
            output_format: job.output_format.unwrap_or(settings.output_format),
            jpeg_quality: job.jpeg_quality.unwrap_or(settings.jpeg_quality),
            fallback_single_page: job
                .fallback_single_page
                .unwrap_or(settings.fallback_single_page),
            write_manifest: settings.write_manifest,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_size.width, self.page_size.height, self.margin)
    }

    pub fn tunables(&self) -> Tunables {
        Tunables {
            snap_threshold: self.snap_threshold,
            min_slice_height: self.min_slice_height,
        }
    }
}
