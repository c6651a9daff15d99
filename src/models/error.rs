use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 批次轉換過程中可能出現的錯誤
#[derive(Debug, Error)]
pub enum JobError {
    #[error("尚未選擇 PDF 檔案")]
    NoSources,

    #[error("尚未選擇儲存路徑")]
    NoDestination,

    #[error("多個來源檔案會產生相同的輸出名稱：{name}")]
    DuplicateOutputName { name: String },

    #[error("轉換 {file} 失敗：{reason}")]
    Conversion { file: String, reason: String },

    #[error("轉換已取消")]
    Cancelled,

    #[error("無法建立暫存目錄：{0}")]
    Staging(#[source] io::Error),

    #[error("寫入 ZIP 檔案 {} 失敗：{source}", .path.display())]
    Packaging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    /// 前置條件錯誤在任務建立前就會回報，不會啟動背景執行緒
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            JobError::NoSources | JobError::NoDestination | JobError::DuplicateOutputName { .. }
        )
    }
}

impl From<JobError> for io::Error {
    fn from(e: JobError) -> Self {
        let kind = if e.is_precondition() {
            io::ErrorKind::InvalidInput
        } else {
            io::ErrorKind::Other
        };
        io::Error::new(kind, e.to_string())
    }
}

/// 外部轉換程式回報的失敗
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("找不到來源檔案：{}", .0.display())]
    MissingSource(PathBuf),

    #[error("無法啟動轉換程式 {program}：{source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("轉換程式結束代碼 {code:?}")]
    Failed { code: Option<i32> },

    #[error("轉換程式未產生輸出檔案：{}", .0.display())]
    MissingOutput(PathBuf),

    #[error("{0}")]
    Rejected(String),
}
