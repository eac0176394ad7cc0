// Phase 9: ジョブ単位: サーフェス読込 -> 改ページ -> ページ画像 + マニフェスト出力

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::job::OutputFormat;
use crate::output::manifest::{ManifestPage, PageManifest, compute_plan_fingerprint};
use crate::output::writer::PageWriter;
use crate::paginate::{Element, PageGeometry, Paginator, Tunables};
use crate::render::fallback::render_single_page;
use crate::render::surface::load_surface;

/// Configuration for a single document export.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Measured sub-elements of the rendered surface (pixel space).
    pub elements: Vec<Element>,
    pub geometry: PageGeometry,
    pub tunables: Tunables,
    pub output_format: OutputFormat,
    pub jpeg_quality: u8,
    /// Render a shrunk single page when pagination fails instead of failing the job.
    pub fallback_single_page: bool,
    pub write_manifest: bool,
}

/// Result of processing a single job.
#[derive(Debug)]
pub struct JobResult {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub pages_written: usize,
    pub fallback: bool,
    pub fingerprint: String,
}

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Export one document: load its surface, split it into pages and write the
/// page images (plus `manifest.json`) into the output directory.
///
/// Invalid geometry or tunables fail the job before any file is touched.
/// Pagination failures fall back to a single shrunk page when
/// `fallback_single_page` is set; otherwise they fail the job.
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let paginator = Paginator::new(config.geometry, config.tunables)?;
    let surface = load_surface(&config.input_path)?;
    info!(
        input = %config.input_path.display(),
        width = surface.width(),
        height = surface.height(),
        elements = config.elements.len(),
        "paginating document"
    );

    let (pages, fallback) = match paginator.paginate(&surface, &config.elements) {
        Ok(pages) => (pages, false),
        Err(e) if config.fallback_single_page => {
            warn!(
                input = %config.input_path.display(),
                error = %e,
                "pagination failed, rendering single-page fallback"
            );
            (vec![render_single_page(&surface, paginator.geometry())?], true)
        }
        Err(e) => return Err(e),
    };

    let writer = PageWriter::new(&config.output_dir, config.output_format, config.jpeg_quality);
    let written = writer.write_pages(&pages)?;
    let geometry = paginator.geometry();
    let tunables = paginator.tunables();
    let fingerprint = compute_plan_fingerprint(&pages, geometry, tunables);

    if config.write_manifest {
        let manifest = PageManifest {
            source: config.input_path.display().to_string(),
            surface_width: surface.width(),
            surface_height: surface.height(),
            page_width: geometry.page_width,
            page_height: geometry.page_height,
            margin: geometry.margin,
            snap_threshold: tunables.snap_threshold,
            min_slice_height: tunables.min_slice_height,
            fallback,
            fingerprint: fingerprint.clone(),
            pages: pages
                .iter()
                .map(|page| ManifestPage {
                    index: page.index,
                    file: writer.file_name(page),
                    source_y_start: page.source_y_start,
                    source_y_end: page.source_y_end,
                    render_height_points: page.render_height_points,
                })
                .collect(),
        };
        manifest.write(&writer.dir().join(MANIFEST_FILE_NAME))?;
    }

    info!(
        output = %config.output_dir.display(),
        pages = written.len(),
        fallback,
        "document exported"
    );

    Ok(JobResult {
        input_path: config.input_path.clone(),
        output_dir: config.output_dir.clone(),
        pages_written: written.len(),
        fallback,
        fingerprint,
    })
}
