// Phase 8: ページ断片をディレクトリへ書き出す

use std::path::{Path, PathBuf};

use tracing::debug;

use super::encode::encode_page;
use crate::config::job::OutputFormat;
use crate::paginate::Page;

/// ページ画像を1ページ1ファイルで出力ディレクトリへ書き出す。
pub struct PageWriter {
    dir: PathBuf,
    format: OutputFormat,
    quality: u8,
}

impl PageWriter {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            format,
            quality,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// ページ番号（1始まり）からファイル名を生成する。例: `page-001.png`
    pub fn file_name(&self, page: &Page) -> String {
        format!("page-{:03}.{}", page.index + 1, self.format.extension())
    }

    /// 全ページをエンコードして書き出す。
    ///
    /// 出力ディレクトリが存在しなければ作成する。戻り値は書き出したパス（ページ順）。
    pub fn write_pages(&self, pages: &[Page]) -> crate::error::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir)?;

        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            let bytes = encode_page(&page.image, self.format, self.quality)?;
            let path = self.dir.join(self.file_name(page));
            std::fs::write(&path, &bytes)?;
            debug!(path = %path.display(), bytes = bytes.len(), "page written");
            written.push(path);
        }
        Ok(written)
    }
}
