use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use log::{debug, warn};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedSender;
use crate::models::error::JobError;
use crate::models::job::{
    docx_name_for, file_name_of, progress_percent, BatchOutcome, ConversionJob, ConversionResult, JobEvent,
    ARCHIVE_NAME,
};
use crate::service::traits::i_service::{ArchivePackager, DocumentConverter};

/// 事件出口，接收端關閉後送出的事件直接丟棄
#[derive(Clone)]
pub struct EventSink {
    tx: UnboundedSender<JobEvent>,
}

impl EventSink {
    pub fn new(tx: UnboundedSender<JobEvent>) -> Self {
        EventSink { tx }
    }

    pub fn log(&self, line: impl Into<String>) {
        self.send(JobEvent::Log(line.into()));
    }

    pub fn progress(&self, percent: u8) {
        self.send(JobEvent::Progress(percent));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(JobEvent::Error(message.into()));
    }

    pub fn finish(&self, outcome: BatchOutcome) {
        self.send(JobEvent::Finished(outcome));
    }

    fn send(&self, event: JobEvent) {
        if self.tx.send(event).is_err() {
            debug!("事件接收端已關閉，忽略事件");
        }
    }
}

/// 一次任務執行完畢後的紀錄
#[derive(Debug, Clone)]
pub struct JobReport {
    pub results: Vec<ConversionResult>,
    pub outcome: BatchOutcome,
}

/// 依序轉換每個來源檔案，全部成功後交給打包服務
pub struct ConversionWorker {
    converter: Arc<dyn DocumentConverter>,
    packager: Arc<dyn ArchivePackager>,
}

impl ConversionWorker {
    pub fn new(converter: Arc<dyn DocumentConverter>, packager: Arc<dyn ArchivePackager>) -> Self {
        ConversionWorker { converter, packager }
    }

    /// 執行整個任務；所有錯誤都在此轉為 `Error` 事件與失敗結果，不會往外拋
    pub fn run(&self, job: &ConversionJob, sink: &EventSink, cancel: &AtomicBool) -> JobReport {
        let mut results = Vec::with_capacity(job.sources().len());
        let outcome = match self.execute(job, sink, cancel, &mut results) {
            Ok(archive) => BatchOutcome::Succeeded { archive },
            Err(e) => {
                let reason = e.to_string();
                sink.error(reason.clone());
                BatchOutcome::Failed { reason }
            }
        };
        JobReport { results, outcome }
    }

    fn execute(
        &self,
        job: &ConversionJob,
        sink: &EventSink,
        cancel: &AtomicBool,
        results: &mut Vec<ConversionResult>,
    ) -> Result<PathBuf, JobError> {
        let staging = create_staging(job.staging_root())?;
        debug!("暫存目錄：{}", staging.path().display());

        let packaged = self
            .convert_all(job, staging.path(), sink, cancel, results)
            .and_then(|staged| {
                if cancel.load(Ordering::SeqCst) {
                    return Err(JobError::Cancelled);
                }
                sink.log(format!("packaging: {}", ARCHIVE_NAME));
                self.packager.package(&staged, &job.archive_path())
            });

        // 不論成功或失敗都清除暫存目錄
        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            warn!("無法刪除暫存目錄 {}：{}", staging_path.display(), e);
        }
        packaged
    }

    fn convert_all(
        &self,
        job: &ConversionJob,
        staging: &Path,
        sink: &EventSink,
        cancel: &AtomicBool,
        results: &mut Vec<ConversionResult>,
    ) -> Result<Vec<PathBuf>, JobError> {
        let total = job.sources().len();
        let mut staged = Vec::with_capacity(total);

        for (index, source) in job.sources().iter().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                return Err(JobError::Cancelled);
            }

            let file_name = file_name_of(source);
            sink.log(format!("converting: {}", file_name));

            let output_name = docx_name_for(source);
            let output_path = staging.join(&output_name);
            let forward = |line: String| sink.log(line);

            if let Err(e) = self.converter.convert(source, &output_path, &forward) {
                let reason = e.to_string();
                results.push(ConversionResult::failed(source, reason.clone()));
                return Err(JobError::Conversion { file: file_name, reason });
            }

            sink.log(format!("done: {}", output_name));
            results.push(ConversionResult::staged(source, output_path.clone()));
            staged.push(output_path);
            sink.progress(progress_percent(index + 1, total));
        }

        Ok(staged)
    }
}

fn create_staging(root: Option<&Path>) -> Result<TempDir, JobError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("pdf_to_docx-");
    match root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    }
    .map_err(JobError::Staging)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::sync::mpsc;
    use crate::models::error::ConvertError;
    use crate::service::zip::ZipService;

    struct CopyConverter;

    impl DocumentConverter for CopyConverter {
        fn convert(&self, source: &Path, destination: &Path, log: &dyn Fn(String)) -> Result<(), ConvertError> {
            if file_name_of(source).starts_with("corrupt") {
                return Err(ConvertError::Rejected("encrypted PDF".to_string()));
            }
            log(format!("read {}", file_name_of(source)));
            fs::write(destination, b"docx").map_err(|e| ConvertError::Rejected(e.to_string()))
        }
    }

    fn worker() -> ConversionWorker {
        ConversionWorker::new(Arc::new(CopyConverter), Arc::new(ZipService::new()))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<JobEvent>) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn converter_diagnostics_are_forwarded_between_markers() {
        let dest = tempfile::tempdir().unwrap();
        let staging_root = tempfile::tempdir().unwrap();
        let job = ConversionJob::new(vec![PathBuf::from("in/a.pdf")], dest.path())
            .unwrap()
            .with_staging_root(staging_root.path());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let report = worker().run(&job, &EventSink::new(tx), &AtomicBool::new(false));

        assert!(report.outcome.is_success());
        assert_eq!(
            drain(&mut rx),
            vec![
                JobEvent::Log("converting: a.pdf".to_string()),
                JobEvent::Log("read a.pdf".to_string()),
                JobEvent::Log("done: a.docx".to_string()),
                JobEvent::Progress(100),
                JobEvent::Log("packaging: converted_docx_files.zip".to_string()),
            ]
        );
        assert_eq!(fs::read_dir(staging_root.path()).unwrap().count(), 0);
    }

    #[test]
    fn failure_records_result_and_stops() {
        let dest = tempfile::tempdir().unwrap();
        let sources = vec![PathBuf::from("a.pdf"), PathBuf::from("corrupt.pdf"), PathBuf::from("c.pdf")];
        let job = ConversionJob::new(sources, dest.path()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();

        let report = worker().run(&job, &EventSink::new(tx), &AtomicBool::new(false));

        assert_eq!(report.results.len(), 2);
        assert!(report.results[0].staged_path().is_some());
        assert_eq!(report.results[1].outcome, Err("encrypted PDF".to_string()));
        match report.outcome {
            BatchOutcome::Failed { reason } => assert!(reason.contains("corrupt.pdf")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn cancelled_before_start_converts_nothing() {
        let dest = tempfile::tempdir().unwrap();
        let job = ConversionJob::new(vec![PathBuf::from("a.pdf")], dest.path()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let report = worker().run(&job, &EventSink::new(tx), &AtomicBool::new(true));

        assert!(report.results.is_empty());
        assert!(!report.outcome.is_success());
        assert_eq!(drain(&mut rx), vec![JobEvent::Error(JobError::Cancelled.to_string())]);
        assert!(!job.archive_path().exists());
    }

    #[test]
    fn sink_survives_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = EventSink::new(tx);
        sink.log("nobody listening");
        sink.finish(BatchOutcome::Failed { reason: "x".to_string() });
    }
}
