use std::io;
use std::path::{Path, PathBuf};
use log::warn;
use walkdir::WalkDir;

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// 展開使用者選擇的路徑：檔案原樣保留，目錄遞迴收集其中的 PDF（依路徑排序）
pub fn collect_pdf_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                if entry.file_type().is_file() && is_pdf(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            if found.is_empty() {
                warn!("目錄 {} 中沒有 PDF 檔案", input.display());
            }
            found.sort();
            files.extend(found);
        } else {
            if input.exists() && !is_pdf(input) {
                warn!("檔案 {} 不是 PDF 副檔名，仍嘗試轉換", input.display());
            }
            files.push(input.clone());
        }
    }
    Ok(files)
}
