use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use log::info;
use tempfile::NamedTempFile;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;
use crate::models::error::JobError;
use crate::models::job::file_name_of;
use crate::service::traits::i_service::ArchivePackager;
use crate::utils::utils::format_file_size;

/// ZIP 打包服務，先寫入目的地內的暫存檔，完成後再改名為正式檔名
pub struct ZipService {
    options: SimpleFileOptions,
}

impl ZipService {
    pub fn new() -> Self {
        ZipService {
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    fn write_archive(&self, files: &[PathBuf], archive_path: &Path) -> io::Result<u64> {
        let dir = archive_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("儲存路徑 '{}' 不存在", dir.display()),
            ));
        }

        // 暫存檔在失敗時隨 drop 一併刪除
        let staging = NamedTempFile::new_in(dir)?;
        let mut zip = ZipWriter::new(staging);
        for file_path in files {
            zip.start_file(file_name_of(file_path), self.options)?;
            let mut reader = BufReader::with_capacity(4 * 1024 * 1024, File::open(file_path)?);
            io::copy(&mut reader, &mut zip)?;
        }
        let staging = zip.finish()?;
        staging.as_file().sync_all()?;
        let size = staging.as_file().metadata()?.len();
        staging.persist(archive_path).map_err(|e| e.error)?;
        Ok(size)
    }
}

impl Default for ZipService {
    fn default() -> Self {
        ZipService::new()
    }
}

impl ArchivePackager for ZipService {
    fn package(&self, files: &[PathBuf], archive_path: &Path) -> Result<PathBuf, JobError> {
        let size = self
            .write_archive(files, archive_path)
            .map_err(|source| JobError::Packaging {
                path: archive_path.to_path_buf(),
                source,
            })?;
        info!(
            "生成 ZIP 檔案：{}，共 {} 個檔案，大小：{}",
            archive_path.display(),
            files.len(),
            format_file_size(size as usize)
        );
        Ok(archive_path.to_path_buf())
    }
}
