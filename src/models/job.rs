use std::collections::HashSet;
use std::path::{Path, PathBuf};
use crate::models::error::JobError;

/// 輸出 ZIP 的固定檔名
pub const ARCHIVE_NAME: &str = "converted_docx_files.zip";

/// 使用者送出的一次批次轉換
#[derive(Debug, Clone)]
pub struct ConversionJob {
    sources: Vec<PathBuf>,
    destination: PathBuf,
    staging_root: Option<PathBuf>,
}

impl ConversionJob {
    /// 驗證來源清單與儲存路徑皆已提供，並確認輸出檔名不會互相覆蓋
    pub fn new(sources: Vec<PathBuf>, destination: impl Into<PathBuf>) -> Result<Self, JobError> {
        if sources.is_empty() {
            return Err(JobError::NoSources);
        }
        let destination = destination.into();
        if destination.as_os_str().is_empty() {
            return Err(JobError::NoDestination);
        }

        // 不分大小寫比對，避免在不分大小寫的檔案系統上互相覆蓋
        let mut seen = HashSet::new();
        for source in &sources {
            let name = docx_name_for(source);
            if !seen.insert(name.to_lowercase()) {
                return Err(JobError::DuplicateOutputName { name });
            }
        }

        Ok(ConversionJob {
            sources,
            destination,
            staging_root: None,
        })
    }

    /// 指定暫存目錄建立的位置，預設為系統暫存區
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn staging_root(&self) -> Option<&Path> {
        self.staging_root.as_deref()
    }

    pub fn archive_path(&self) -> PathBuf {
        self.destination.join(ARCHIVE_NAME)
    }
}

/// 單一來源檔案的轉換結果，建立後不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub source: PathBuf,
    pub outcome: Result<PathBuf, String>,
}

impl ConversionResult {
    pub fn staged(source: &Path, staged: PathBuf) -> Self {
        ConversionResult {
            source: source.to_path_buf(),
            outcome: Ok(staged),
        }
    }

    pub fn failed(source: &Path, reason: impl Into<String>) -> Self {
        ConversionResult {
            source: source.to_path_buf(),
            outcome: Err(reason.into()),
        }
    }

    pub fn staged_path(&self) -> Option<&Path> {
        self.outcome.as_ref().ok().map(PathBuf::as_path)
    }
}

/// 任務的最終結果，每個任務只會產生一次
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Succeeded { archive: PathBuf },
    Failed { reason: String },
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Succeeded { .. })
    }
}

/// 背景任務回傳給呼叫端的事件
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Log(String),
    Progress(u8),
    Error(String),
    Finished(BatchOutcome),
}

/// 已完成檔案數換算成 0..=100 的進度，四捨五入
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    ((100 * completed + total / 2) / total) as u8
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// `<主檔名>.docx`
pub fn docx_name_for(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    format!("{}.docx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_is_rejected() {
        let err = ConversionJob::new(Vec::new(), "/out").unwrap_err();
        assert!(matches!(err, JobError::NoSources));
        assert!(err.is_precondition());
    }

    #[test]
    fn empty_destination_is_rejected() {
        let err = ConversionJob::new(vec![PathBuf::from("a.pdf")], "").unwrap_err();
        assert!(matches!(err, JobError::NoDestination));
    }

    #[test]
    fn colliding_output_names_are_rejected() {
        let sources = vec![PathBuf::from("one/report.pdf"), PathBuf::from("two/report.PDF")];
        let err = ConversionJob::new(sources, "/out").unwrap_err();
        match err {
            JobError::DuplicateOutputName { name } => assert_eq!(name, "report.docx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn case_only_differences_collide() {
        let sources = vec![PathBuf::from("in/a.pdf"), PathBuf::from("in/A.pdf")];
        let err = ConversionJob::new(sources, "/out").unwrap_err();
        match err {
            JobError::DuplicateOutputName { name } => assert_eq!(name, "A.docx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn archive_lands_in_destination() {
        let job = ConversionJob::new(vec![PathBuf::from("a.pdf")], "/out").unwrap();
        assert_eq!(job.archive_path(), PathBuf::from("/out/converted_docx_files.zip"));
    }

    #[test]
    fn docx_name_replaces_extension() {
        assert_eq!(docx_name_for(Path::new("/in/a.pdf")), "a.docx");
        assert_eq!(docx_name_for(Path::new("notes.v2.pdf")), "notes.v2.docx");
        assert_eq!(docx_name_for(Path::new("plain")), "plain.docx");
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(0, 4), 0);
    }
}
