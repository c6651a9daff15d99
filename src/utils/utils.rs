use std::io;
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use log;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

/// 以百分比顯示批次進度的進度條
pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total_files: usize, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}% ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        pb.set_message(format!("準備轉換 {} 個檔案", total_files));
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, percent: u8) {
        if self.no_progress {
            return;
        }
        self.pb.set_message("轉換中");
        self.pb.set_position(u64::from(percent.min(100)));
    }

    /// 輸出日誌時暫停進度條，避免畫面互相覆蓋
    pub fn log(&self, line: &str) {
        self.pb.suspend(|| log::info!("{}", line));
    }

    pub fn error(&self, line: &str) {
        self.pb.suspend(|| log::error!("{}", line));
    }

    pub fn finish(&self, success: bool) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        if success {
            self.pb.finish_with_message(format!("完成，耗時 {:.1} 秒", elapsed));
        } else {
            self.pb.abandon_with_message(format!("失敗，耗時 {:.1} 秒", elapsed));
        }
    }
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_size_switches_units_at_one_megabyte() {
        assert_eq!(format_file_size(512), "0.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }

    #[test]
    fn hidden_progress_ignores_updates() {
        let pm = ProgressManager::new(2, true);
        pm.update(50);
        pm.update(100);
        pm.finish(true);
    }
}
