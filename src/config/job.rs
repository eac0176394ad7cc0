use std::path::Path;

use serde::Deserialize;

use crate::error::PaginateError;
use crate::paginate::{Element, PageGeometry};

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// 描画済みサーフェス画像（PNG/JPEG等）
    pub input: String,
    /// ページ画像の出力ディレクトリ
    pub output: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    pub elements_file: Option<String>,
    pub page_size: Option<PageSize>,
    pub margin: Option<f64>,
    pub snap_threshold: Option<f64>,
    pub min_slice_height: Option<f64>,
    pub output_format: Option<OutputFormat>,
    pub jpeg_quality: Option<u8>,
    pub fallback_single_page: Option<bool>,
}

impl Job {
    /// インライン要素と `elements_file` の要素を結合して返す。
    ///
    /// `elements_file` はジョブファイルのディレクトリからの相対パスとして解決する。
    /// YAMLとJSONのどちらでも読み込める。
    pub fn resolve_elements(&self, job_dir: &Path) -> crate::error::Result<Vec<Element>> {
        let mut elements = self.elements.clone();
        if let Some(file) = &self.elements_file {
            let path = job_dir.join(file);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                PaginateError::config(format!(
                    "Failed to read elements file {}: {e}",
                    path.display()
                ))
            })?;
            let from_file: Vec<Element> = serde_yml::from_str(&content).map_err(|e| {
                PaginateError::config(format!(
                    "Failed to parse elements file {}: {e}",
                    path.display()
                ))
            })?;
            elements.extend(from_file);
        }
        Ok(elements)
    }
}

/// ページ画像のエンコード形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// 用紙サイズ（ポイント単位）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        let (width, height) = PageGeometry::A4;
        PageSize { width, height }
    }
}

impl TryFrom<String> for PageSize {
    type Error = PaginateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_page_size(&s)
    }
}

/// 用紙サイズ文字列をパースする。
///
/// 形式:
/// - 定型名: `"a4"`, `"letter"`, `"legal"`（大文字小文字は区別しない）
/// - 幅x高さ（ポイント）: `"595x842"`, `"612.0 x 792.0"`
pub fn parse_page_size(s: &str) -> crate::error::Result<PageSize> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PaginateError::config("Page size cannot be empty"));
    }

    let named = match trimmed.to_ascii_lowercase().as_str() {
        "a4" => Some(PageGeometry::A4),
        "letter" => Some(PageGeometry::LETTER),
        "legal" => Some(PageGeometry::LEGAL),
        _ => None,
    };
    if let Some((width, height)) = named {
        return Ok(PageSize { width, height });
    }

    let (w_str, h_str) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| PaginateError::config(format!("Unknown page size: '{trimmed}'")))?;
    let width: f64 = w_str.trim().parse().map_err(|_| {
        PaginateError::config(format!("Invalid page width: '{}'", w_str.trim()))
    })?;
    let height: f64 = h_str.trim().parse().map_err(|_| {
        PaginateError::config(format!("Invalid page height: '{}'", h_str.trim()))
    })?;

    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(PaginateError::config(format!(
            "Page size must be positive, got {width}x{height}"
        )));
    }

    Ok(PageSize { width, height })
}
