//! # 图片转贴纸包工具 — 应用入口
//!
//! 本文件仅负责控制台交互：横幅、校验状态行、作者/包名提示与结果列表。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use images_to_stickers::error::AppError;
use images_to_stickers::sticker::{
    PackMetadata, PackSummary, PreparedInputs, StickerError, StickerHandler, WorkArea,
};
use images_to_stickers::{settings, storage};

const BANNER: &str = "<------------------- IMAGES TO STICKERS ------------------->";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("运行失败: {err}");
            eprintln!("\n{err}");
            if let Some(hint) = err.remediation() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = settings::load_settings()?;
    let handler = StickerHandler::new(settings.to_config()?);

    clear_console();
    println!("{BANNER}\n");

    let PreparedInputs { icon, images } =
        report_inputs(handler.prepare_inputs(&settings.input_dir()))?;

    let work_area = WorkArea::open(settings.temp_dir())?;
    handler.convert_icon(&icon, &work_area)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let author = prompt(&mut input, "\nAuthor for the package: ")?;
    let package_name = prompt(&mut input, "Package name: ")?;
    if package_name.trim().is_empty() {
        return Err(AppError::Prompt("包名不能为空".to_string()));
    }

    let out_dir = storage::ensure_dir(Path::new(&package_name))?;
    let metadata = PackMetadata::new(author, package_name);

    handler.build_packs(images, &work_area, &out_dir, &metadata, print_pack)?;
    work_area.teardown()?;

    let info = storage::dir_info(&out_dir)?;
    println!(
        "\n{} file(s) in {} ({} bytes)",
        info.file_count, info.path, info.total_size
    );

    prompt(&mut input, "\nType anything to exit: ")?;
    Ok(())
}

/// 按校验结果打印状态行。图标缺失时不再检查图片数量。
fn report_inputs(
    result: Result<PreparedInputs, StickerError>,
) -> Result<PreparedInputs, StickerError> {
    for (label, ok) in status_lines(&result) {
        println!("{label}: {}", if ok { "OK" } else { "FAILED" });
    }
    result
}

fn status_lines<T>(result: &Result<T, StickerError>) -> Vec<(&'static str, bool)> {
    match result {
        Ok(_) => vec![("Icon image", true), ("Images quantity", true)],
        Err(StickerError::MissingIcon) => vec![("Icon image", false)],
        Err(StickerError::EmptyInput) => vec![("Icon image", true), ("Images quantity", false)],
        Err(_) => Vec::new(),
    }
}

/// 输出提示并读取一行，去掉行尾换行符；EOF 视为空输入。
fn prompt(input: &mut impl BufRead, message: &str) -> Result<String, AppError> {
    print!("{message}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::Prompt(format!("刷新输出失败: {e}")))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| AppError::Prompt(format!("读取输入失败: {e}")))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_pack(summary: &PackSummary) {
    println!("\n{} saved:", summary.path.display());
    println!("{:<46} {:>12}", "File Name", "Size");
    for entry in &summary.entries {
        println!("{:<46} {:>12}", entry.name, entry.size);
    }
}

fn clear_console() {
    print!("\x1B[2J\x1B[1;1H");
    if let Err(err) = io::stdout().flush() {
        log::debug!("清屏输出刷新失败: {err}");
    }
}
