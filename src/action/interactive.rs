use dialoguer::{Confirm, Input};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::config::validate_converter;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::converter::DEFAULT_CONVERTER_PROGRAM;
use crate::utils::convert::ConversionAdapter;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<String> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging("info")?;
    let inputs = get_input_paths()?;
    let output = get_output_path()?;

    let config_port: Box<dyn ConfigPort> = if get_default_config_option()? {
        println!("使用預設配置：pdf2docx 轉換，系統暫存區");
        Box::new(DefaultConfigAdapter::new(inputs, output))
    } else {
        Box::new(InteractiveConfigAdapter::new(inputs, output))
    };

    let config = ConfigService::new(config_port).get_config()?;
    ConversionAdapter.execute(config)
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（pdf2docx 轉換程式，僅需指定 PDF 和儲存路徑）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

/// 單行輸入轉為路徑，空白行代表輸入結束；路徑本身可含逗號
pub fn parse_input_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
}

fn check_input_path(raw: &str, first: bool) -> Result<(), String> {
    match parse_input_path(raw) {
        None if first => Err("請先選擇 PDF 檔案".to_string()),
        None => Ok(()),
        Some(path) if !path.exists() => Err(format!("路徑 '{}' 不存在", path.display())),
        Some(_) => Ok(()),
    }
}

/// 每次輸入一個路徑，直到輸入空白行為止
pub fn get_input_paths() -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    loop {
        let first = paths.is_empty();
        let prompt = if first {
            "請輸入 PDF 檔案或目錄路徑（例如：./a.pdf 或 ./docs）"
        } else {
            "繼續輸入路徑，直接按 Enter 結束"
        };
        let raw: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(move |input: &String| check_input_path(input, first))
            .interact_text()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        match parse_input_path(&raw) {
            Some(path) => paths.push(path),
            None => break,
        }
    }
    Ok(paths)
}

pub fn get_output_path() -> io::Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt("輸入轉換後儲存路徑（例如：./output，預設為目前目錄）")
        .default(".".to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).is_dir() { Ok(()) } else { Err(format!("目錄 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(PathBuf::from(raw))
}

pub fn get_converter_program() -> io::Result<(String, Vec<String>)> {
    let program: String = Input::new()
        .with_prompt("輸入轉換程式（預設為 pdf2docx）")
        .default(DEFAULT_CONVERTER_PROGRAM.to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("轉換程式輸入失敗: {}", e)))?;
    validate_converter(&program)?;

    let args: String = Input::new()
        .with_prompt("輸入轉換程式參數，以逗號分隔（預設為 convert）")
        .default("convert".to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("轉換參數輸入失敗: {}", e)))?;
    let args = args
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok((program, args))
}

pub fn get_no_progress_option() -> io::Result<bool> {
    let show = Confirm::new()
        .with_prompt("是否顯示進度條？")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("進度條選項輸入失敗: {}", e)))?;
    Ok(!show)
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    inputs: Vec<PathBuf>,
    output: PathBuf,
}

impl InteractiveConfigAdapter {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        InteractiveConfigAdapter { inputs, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let (converter_program, converter_args) = get_converter_program()?;
        let no_progress = get_no_progress_option()?;

        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: Some(self.output.clone()),
            converter_program,
            converter_args,
            staging_dir: None,
            no_progress,
        })
    }
}
