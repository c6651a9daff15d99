use std::io;
use clap::Parser;
use crate::config::config::{validate_converter, validate_staging_dir, Cli};
use crate::action::interactive::process_interactive_mode;
use crate::utils::utils::setup_logging;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::service::config_service::ConfigService;
use crate::utils::convert::ConversionAdapter;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode(args)
    }
}

pub fn process_cli_mode(args: Vec<String>) -> io::Result<String> {
    let cli = Cli::parse_from(args);
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;

    // 若啟用 --show-config，在轉換前顯示配置
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    conversion_port.execute(config)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_converter(&self.cli.converter)?;
        validate_staging_dir(&self.cli.staging_dir)?;

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone(),
            converter_program: self.cli.converter.clone(),
            converter_args: self.cli.converter_args.clone(),
            staging_dir: self.cli.staging_dir.clone(),
            no_progress: self.cli.no_progress,
        })
    }
}
