use std::io;
use std::sync::Arc;
use log::info;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::job::{BatchOutcome, ConversionJob, JobEvent};
use crate::service::zip::ZipService;
use crate::utils::file::collect_pdf_files;
use crate::utils::utils::ProgressManager;

/// 依配置建立任務並在背景執行，前景負責顯示事件與進度
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<String> {
        let files = collect_pdf_files(&config.inputs)?;
        let mut job = ConversionJob::new(files, config.output.clone().unwrap_or_default())?;
        if let Some(root) = &config.staging_dir {
            job = job.with_staging_root(root);
        }

        let facade = ConversionFacade::new(Arc::new(config.converter()), Arc::new(ZipService::new()));
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_job(&facade, job, config.no_progress))
    }
}

pub async fn run_job(facade: &dyn ConversionFacadeTrait, job: ConversionJob, no_progress: bool) -> io::Result<String> {
    let pm = ProgressManager::new(job.sources().len(), no_progress);
    let handle = facade.submit(job);
    let report = handle
        .drive(|event| match event {
            JobEvent::Log(line) => pm.log(line),
            JobEvent::Progress(percent) => pm.update(*percent),
            JobEvent::Error(message) => pm.error(message),
            JobEvent::Finished(outcome) => pm.finish(outcome.is_success()),
        })
        .await?;

    match report.outcome {
        BatchOutcome::Succeeded { archive } => {
            info!("轉換完成，共 {} 個檔案", report.results.len());
            Ok(archive.display().to_string())
        }
        // 失敗原因已由 Error 事件輸出
        BatchOutcome::Failed { reason } => Err(io::Error::new(io::ErrorKind::Other, reason)),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use std::sync::{Mutex, Once};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use zip::ZipArchive;

    static CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut captured) = CAPTURED.lock() {
                captured.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Info);
        });
    }

    fn errors_mentioning(marker: &str) -> usize {
        CAPTURED
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, line)| *level == Level::Error && line.contains(marker))
            .count()
    }

    fn config(inputs: Vec<PathBuf>, output: Option<PathBuf>, script: &str) -> AppConfig {
        AppConfig {
            inputs,
            output,
            converter_program: "sh".to_string(),
            converter_args: vec!["-c".to_string(), script.to_string()],
            staging_dir: None,
            no_progress: true,
        }
    }

    #[test]
    fn converts_directory_into_archive() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.pdf"), b"%PDF a").unwrap();
        fs::write(input.path().join("b.pdf"), b"%PDF b").unwrap();
        fs::write(input.path().join("readme.txt"), b"skip").unwrap();

        let archive = ConversionAdapter
            .execute(config(
                vec![input.path().to_path_buf()],
                Some(output.path().to_path_buf()),
                "cp \"$0\" \"$1\"",
            ))
            .unwrap();

        assert_eq!(PathBuf::from(&archive), output.path().join("converted_docx_files.zip"));
        let zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut names: Vec<_> = zip.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["a.docx", "b.docx"]);
    }

    #[test]
    fn missing_output_is_invalid_input() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.pdf"), b"%PDF a").unwrap();

        let err = ConversionAdapter
            .execute(config(vec![input.path().join("a.pdf")], None, "cp \"$0\" \"$1\""))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn failing_converter_surfaces_error() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.pdf"), b"%PDF a").unwrap();

        let err = ConversionAdapter
            .execute(config(
                vec![input.path().join("a.pdf")],
                Some(output.path().to_path_buf()),
                "exit 1",
            ))
            .unwrap_err();

        assert!(err.to_string().contains("a.pdf"));
        assert!(!output.path().join("converted_docx_files.zip").exists());
    }

    #[test]
    fn failure_is_logged_once() {
        capture_logs();
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("logged-once.pdf"), b"%PDF a").unwrap();

        let err = ConversionAdapter
            .execute(config(
                vec![input.path().join("logged-once.pdf")],
                Some(output.path().to_path_buf()),
                "exit 1",
            ))
            .unwrap_err();

        assert!(err.to_string().contains("logged-once.pdf"));
        assert_eq!(errors_mentioning("logged-once.pdf"), 1);
    }
}
