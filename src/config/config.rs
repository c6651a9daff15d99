use clap::Parser;
use std::io;
use std::path::PathBuf;
use crate::service::converter::DEFAULT_CONVERTER_PROGRAM;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "pdf_to_docx",
    about = "將多個 PDF 檔案轉換為 DOCX 並打包成單一 ZIP",
    long_about = "一個批次將 PDF 轉換為 DOCX 的工具，轉換結果會打包成 converted_docx_files.zip 存放於指定的儲存路徑。\n輸入可以是 PDF 檔案或目錄（遞迴收集其中的 PDF）。任一檔案轉換失敗即停止，不會產生 ZIP。\n不帶任何參數執行時進入互動模式。使用 `--help` 查看詳細用法。"
)]
pub struct Cli {
    /// PDF 檔案或包含 PDF 的目錄
    pub inputs: Vec<PathBuf>,
    /// ZIP 檔案的儲存目錄
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// 外部轉換程式，會以 `<程式> <參數...> <來源> <輸出>` 呼叫
    #[arg(long, default_value = DEFAULT_CONVERTER_PROGRAM)]
    pub converter: String,
    #[arg(long, default_value = "convert", value_delimiter = ',', allow_hyphen_values = true)]
    pub converter_args: Vec<String>,
    /// 暫存目錄建立的位置，預設為系統暫存區
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

pub fn validate_converter(program: &str) -> io::Result<()> {
    if program.trim().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "轉換程式名稱不可為空"));
    }
    Ok(())
}

pub fn validate_staging_dir(staging_dir: &Option<PathBuf>) -> io::Result<()> {
    if let Some(dir) = staging_dir {
        if !dir.is_dir() {
            log::error!("暫存目錄不存在：{}", dir.display());
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("暫存目錄 '{}' 不存在", dir.display()),
            ));
        }
    }
    Ok(())
}
