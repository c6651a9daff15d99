use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use log::{error, info};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::facade::worker::{ConversionWorker, EventSink, JobReport};
use crate::models::job::{BatchOutcome, ConversionJob, JobEvent};
use crate::service::traits::i_service::{ArchivePackager, DocumentConverter};

pub struct ConversionFacade {
    converter: Arc<dyn DocumentConverter>,
    packager: Arc<dyn ArchivePackager>,
}

impl ConversionFacade {
    pub fn new(converter: Arc<dyn DocumentConverter>, packager: Arc<dyn ArchivePackager>) -> Self {
        ConversionFacade { converter, packager }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    /// 必須在 tokio runtime 內呼叫
    fn submit(&self, job: ConversionJob) -> JobHandle {
        let (tx, events) = mpsc::unbounded_channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker = ConversionWorker::new(Arc::clone(&self.converter), Arc::clone(&self.packager));
        let flag = Arc::clone(&cancel);

        info!("開始轉換 {} 個檔案，輸出目錄：{}", job.sources().len(), job.destination().display());
        let task = tokio::task::spawn_blocking(move || {
            let sink = EventSink::new(tx);
            let report = panic::catch_unwind(AssertUnwindSafe(|| worker.run(&job, &sink, &flag)))
                .unwrap_or_else(|_| {
                    let reason = "轉換執行緒發生未預期的錯誤".to_string();
                    error!("{}", reason);
                    sink.error(reason.clone());
                    JobReport {
                        results: Vec::new(),
                        outcome: BatchOutcome::Failed { reason },
                    }
                });
            sink.finish(report.outcome.clone());
            report
        });

        JobHandle { events, cancel, task }
    }
}

/// 執行中任務的控制代碼
pub struct JobHandle {
    events: UnboundedReceiver<JobEvent>,
    cancel: Arc<AtomicBool>,
    task: JoinHandle<JobReport>,
}

impl JobHandle {
    /// 依處理順序取得下一個事件，`Finished` 之後返回 `None`
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        self.events.recv().await
    }

    /// 在下一個檔案開始前停止任務
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub async fn wait(self) -> io::Result<JobReport> {
        self.task
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("轉換任務中斷: {}", e)))
    }

    /// 逐一處理事件直到任務結束
    pub async fn drive<F>(mut self, mut on_event: F) -> io::Result<JobReport>
    where
        F: FnMut(&JobEvent),
    {
        while let Some(event) = self.next_event().await {
            on_event(&event);
        }
        self.wait().await
    }
}
