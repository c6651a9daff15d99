use std::io;

use pdf_to_docx::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let archive = process_args(args)?;
    log::info!("程式執行完成，ZIP 檔案：{}", archive);
    println!("轉換完成！ZIP 檔案已儲存於：{}", archive);
    Ok(())
}
