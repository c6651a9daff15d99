use std::io;
use std::path::PathBuf;
use crate::service::converter::CommandConverter;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub converter_program: String,
    pub converter_args: Vec<String>,
    pub staging_dir: Option<PathBuf>,
    pub no_progress: bool,
}

impl AppConfig {
    pub fn converter(&self) -> CommandConverter {
        CommandConverter::new(self.converter_program.clone(), self.converter_args.clone())
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port，成功時返回 ZIP 路徑
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<String>;
}
