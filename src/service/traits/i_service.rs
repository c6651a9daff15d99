use std::path::{Path, PathBuf};
use crate::models::error::{ConvertError, JobError};

// 轉換服務接口，封裝外部的 PDF → DOCX 轉換能力
pub trait DocumentConverter: Send + Sync {
    /// 將單一 PDF 轉換為 DOCX
    /// # 參數
    /// - source: 來源 PDF 路徑
    /// - destination: DOCX 輸出路徑
    /// - log: 轉換過程中的診斷訊息回呼
    /// # 回傳
    /// - 成功時輸出檔已寫入 destination，失敗時返回原因
    fn convert(&self, source: &Path, destination: &Path, log: &dyn Fn(String)) -> Result<(), ConvertError>;
}

// 打包服務接口，負責將暫存的 DOCX 檔案壓縮成單一 ZIP
pub trait ArchivePackager: Send + Sync {
    /// 將檔案以檔名（不含目錄）寫入目的地的 ZIP 檔案
    /// # 參數
    /// - files: 已存在的暫存檔案
    /// - archive_path: ZIP 最終路徑，已存在時會被覆蓋
    /// # 回傳
    /// - 成功時返回 ZIP 路徑，失敗時返回打包錯誤且不留下不完整的 ZIP
    fn package(&self, files: &[PathBuf], archive_path: &Path) -> Result<PathBuf, JobError>;
}
