use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use log::debug;
use crate::models::error::ConvertError;
use crate::service::traits::i_service::DocumentConverter;

pub const DEFAULT_CONVERTER_PROGRAM: &str = "pdf2docx";

/// 透過外部程式執行轉換，預設呼叫 `pdf2docx convert <來源> <輸出>`
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// `args` 放在來源與輸出路徑之前
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandConverter {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandConverter {
    fn default() -> Self {
        CommandConverter::new(DEFAULT_CONVERTER_PROGRAM, ["convert"])
    }
}

impl DocumentConverter for CommandConverter {
    fn convert(&self, source: &Path, destination: &Path, log: &dyn Fn(String)) -> Result<(), ConvertError> {
        if !source.is_file() {
            return Err(ConvertError::MissingSource(source.to_path_buf()));
        }

        debug!("執行轉換程式：{} {:?} {} {}", self.program, self.args, source.display(), destination.display());
        let spawn_error = |source| ConvertError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(destination)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // 兩個輸出管道各由一條執行緒讀取，依到達順序在呼叫端執行緒轉送
        let (tx, rx) = mpsc::channel();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        thread::scope(|scope| {
            if let Some(stdout) = stdout {
                let tx = tx.clone();
                scope.spawn(move || pipe_lines(stdout, tx));
            }
            if let Some(stderr) = stderr {
                let tx = tx.clone();
                scope.spawn(move || pipe_lines(stderr, tx));
            }
            drop(tx);
            for line in rx {
                log(line);
            }
        });

        let status = child.wait().map_err(spawn_error)?;
        if !status.success() {
            return Err(ConvertError::Failed { code: status.code() });
        }
        if !destination.is_file() {
            return Err(ConvertError::MissingOutput(destination.to_path_buf()));
        }
        Ok(())
    }
}

fn pipe_lines<R: Read>(reader: R, tx: mpsc::Sender<String>) {
    for chunk in BufReader::new(reader).split(b'\n') {
        let Ok(chunk) = chunk else { break };
        let line = String::from_utf8_lossy(&chunk).trim().to_string();
        if !line.is_empty() && tx.send(line).is_err() {
            break;
        }
    }
}
