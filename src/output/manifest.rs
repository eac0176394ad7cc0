// Phase 8: ページマニフェスト + 改ページ計画のSHA-256フィンガープリント
//
// The fingerprint covers the page geometry, the tunables and the resulting
// pixel break sequence, so two runs over identical inputs produce the same
// lowercase hex string.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::paginate::{Page, PageGeometry, Tunables};

/// 1ページ分のマニフェスト項目
#[derive(Debug, Clone, Serialize)]
pub struct ManifestPage {
    pub index: usize,
    pub file: String,
    pub source_y_start: u32,
    pub source_y_end: u32,
    pub render_height_points: f64,
}

/// 出力ディレクトリに書き出すページ一覧
#[derive(Debug, Clone, Serialize)]
pub struct PageManifest {
    pub source: String,
    pub surface_width: u32,
    pub surface_height: u32,
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub snap_threshold: f64,
    pub min_slice_height: f64,
    /// 改ページに失敗し1ページ縮小描画にフォールバックした場合true
    pub fallback: bool,
    pub fingerprint: String,
    pub pages: Vec<ManifestPage>,
}

impl PageManifest {
    pub fn write(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// 設定を正規化JSON形式に変換する（キーはアルファベット順で固定）。
fn layout_to_canonical_json(geometry: &PageGeometry, tunables: &Tunables) -> String {
    let mut map = BTreeMap::new();
    map.insert("margin", serde_json::json!(geometry.margin));
    map.insert("min_slice_height", serde_json::json!(tunables.min_slice_height));
    map.insert("page_height", serde_json::json!(geometry.page_height));
    map.insert("page_width", serde_json::json!(geometry.page_width));
    map.insert("snap_threshold", serde_json::json!(tunables.snap_threshold));
    serde_json::to_string(&map)
        .expect("serializing primitive layout settings to JSON must not fail")
}

/// 改ページ結果と設定からフィンガープリント（SHA-256ハッシュ）を計算する。
///
/// ハッシュ入力: `settings_canonical_json || (y_start || y_end || render_height)*`
/// ピクセルデータは含めない。
pub fn compute_plan_fingerprint(
    pages: &[Page],
    geometry: &PageGeometry,
    tunables: &Tunables,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(layout_to_canonical_json(geometry, tunables).as_bytes());
    for page in pages {
        hasher.update(page.source_y_start.to_le_bytes());
        hasher.update(page.source_y_end.to_le_bytes());
        hasher.update(page.render_height_points.to_bits().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
