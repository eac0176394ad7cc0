// Phase 9: ジョブ実行パイプラインテスト

use std::path::{Path, PathBuf};

use doc_pager::config::job::OutputFormat;
use doc_pager::error::PaginateError;
use doc_pager::paginate::{Element, ElementKind, PageGeometry, Tunables};
use doc_pager::pipeline::job_runner::{JobConfig, MANIFEST_FILE_NAME, run_job};
use doc_pager::pipeline::orchestrator::run_all_jobs;
use image::{Rgba, RgbaImage};

/// usable area 50 x 700pt
fn geometry() -> PageGeometry {
    PageGeometry::new(130.0, 780.0, 40.0)
}

fn write_surface(path: &Path, width: u32, height: u32) {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    image.save(path).expect("failed to save test surface");
}

fn job(input: PathBuf, output: PathBuf, elements: Vec<Element>) -> JobConfig {
    JobConfig {
        input_path: input,
        output_dir: output,
        elements,
        geometry: geometry(),
        tunables: Tunables::default(),
        output_format: OutputFormat::Png,
        jpeg_quality: 85,
        fallback_single_page: true,
        write_manifest: true,
    }
}

// ============================================================
// 1. 単一ジョブ
// ============================================================

#[test]
fn test_run_job_writes_pages_and_manifest() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("quote.png");
    write_surface(&input, 50, 1500);
    let output = dir.path().join("out");

    let elements = vec![
        Element::new(ElementKind::Row, 600.0, 50.0),
        Element::new(ElementKind::Closing, 1300.0, 120.0),
    ];
    let result = run_job(&job(input.clone(), output.clone(), elements)).expect("job should succeed");

    assert_eq!(result.pages_written, 3);
    assert!(!result.fallback);
    assert_eq!(result.fingerprint.len(), 64);

    for (i, expected_height) in [(1, 650), (2, 770), (3, 80)] {
        let path = output.join(format!("page-{i:03}.png"));
        let page = image::open(&path).expect("page image should be readable");
        assert_eq!(page.width(), 50);
        assert_eq!(page.height(), expected_height, "height of {}", path.display());
    }

    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(output.join(MANIFEST_FILE_NAME)).expect("manifest exists"),
    )
    .expect("manifest is JSON");
    assert_eq!(manifest["fallback"], false);
    assert_eq!(manifest["surface_height"], 1500);
    assert_eq!(manifest["fingerprint"], result.fingerprint.as_str());
    let pages = manifest["pages"].as_array().expect("pages array");
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1]["file"], "page-002.png");
    assert_eq!(pages[1]["source_y_start"], 650);
    assert_eq!(pages[1]["source_y_end"], 1420);
}

#[test]
fn test_run_job_is_deterministic() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("quote.png");
    write_surface(&input, 50, 2300);

    let first = run_job(&job(input.clone(), dir.path().join("a"), vec![])).expect("first run");
    let second = run_job(&job(input, dir.path().join("b"), vec![])).expect("second run");
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.pages_written, second.pages_written);
}

#[test]
fn test_run_job_jpeg_without_manifest() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("quote.png");
    write_surface(&input, 50, 400);
    let output = dir.path().join("out");

    let mut config = job(input, output.clone(), vec![]);
    config.output_format = OutputFormat::Jpeg;
    config.jpeg_quality = 60;
    config.write_manifest = false;

    let result = run_job(&config).expect("job should succeed");
    assert_eq!(result.pages_written, 1);

    let bytes = std::fs::read(output.join("page-001.jpg")).expect("jpeg page exists");
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "should start with JPEG SOI marker");
    assert!(!output.join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn test_run_job_invalid_jpeg_quality() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("quote.png");
    write_surface(&input, 50, 100);

    let mut config = job(input, dir.path().join("out"), vec![]);
    config.output_format = OutputFormat::Jpeg;
    config.jpeg_quality = 0;

    let err = run_job(&config).unwrap_err();
    assert!(matches!(err, PaginateError::EncodeError(_)), "got {err:?}");
}

#[test]
fn test_run_job_invalid_geometry_writes_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("quote.png");
    write_surface(&input, 50, 100);
    let output = dir.path().join("out");

    let mut config = job(input, output.clone(), vec![]);
    config.geometry = PageGeometry::new(100.0, 100.0, 80.0);

    let err = run_job(&config).unwrap_err();
    assert!(matches!(err, PaginateError::ConfigError(_)), "got {err:?}");
    assert!(!output.exists());
}

#[test]
fn test_run_job_missing_input() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = run_job(&job(
        dir.path().join("missing.png"),
        dir.path().join("out"),
        vec![],
    ))
    .unwrap_err();
    assert!(matches!(err, PaginateError::RenderError(_)), "got {err:?}");
}

// ============================================================
// 2. 複数ジョブ
// ============================================================

#[test]
fn test_run_all_jobs_continues_after_failure() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let good = dir.path().join("good.png");
    write_surface(&good, 50, 900);

    let jobs = vec![
        job(dir.path().join("missing.png"), dir.path().join("bad"), vec![]),
        job(good, dir.path().join("good"), vec![]),
    ];
    let results = run_all_jobs(&jobs);

    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    let ok = results[1].as_ref().expect("second job should succeed");
    assert_eq!(ok.pages_written, 2);
}
