use std::io;
use std::path::PathBuf;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::service::converter::DEFAULT_CONVERTER_PROGRAM;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：pdf2docx 轉換、系統暫存區、顯示進度條
pub struct DefaultConfigAdapter {
    inputs: Vec<PathBuf>,
    output: PathBuf,
}

impl DefaultConfigAdapter {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        DefaultConfigAdapter { inputs, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: Some(self.output.clone()),
            converter_program: DEFAULT_CONVERTER_PROGRAM.to_string(),
            converter_args: vec!["convert".to_string()],
            staging_dir: None,
            no_progress: false,
        })
    }
}
