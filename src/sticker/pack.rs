//! # 打包模块
//!
//! ## 设计思路
//!
//! 一个批次对应一个 `.wastickers`（zip 兼容）文件，内容固定为：
//! `author.txt`、`title.txt`、`icon.png`，以及工作区中当前的全部贴纸。
//! 每个贴纸写入后立即从工作区删除，工作区随之被清空，供下一个批次复用；图标保留。
//!
//! ## 实现思路
//!
//! - 先写到 `<name>.wastickers.part`，`finish` 成功后再重命名，失败时删除半成品。
//! - 条目名与源文件路径分开传入，不切换进程当前目录。
//! - 条目不压缩（`Stored`）。

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::source::pack_suffix;
use super::work_area::remove_file;
use super::{PackMetadata, StickerError, WorkArea};

pub const ARCHIVE_EXTENSION: &str = "wastickers";
pub const AUTHOR_ENTRY: &str = "author.txt";
pub const TITLE_ENTRY: &str = "title.txt";
pub const ICON_ENTRY: &str = "icon.png";
/// 每个包中除贴纸以外的固定条目数量。
pub const METADATA_ENTRY_COUNT: usize = 3;

/// 包内的一个条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub name: String,
    pub size: u64,
}

/// 一次打包的结果，用于打印包内目录。
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub path: PathBuf,
    pub title: String,
    pub entries: Vec<PackEntry>,
}

impl PackSummary {
    pub fn sticker_count(&self) -> usize {
        self.entries.len().saturating_sub(METADATA_ENTRY_COUNT)
    }
}

/// 第 `batch_index` 个包的文件名。
pub fn archive_name(base_name: &str, batch_index: usize) -> String {
    format!("{}{}.{}", base_name, pack_suffix(batch_index), ARCHIVE_EXTENSION)
}

/// 将工作区当前内容打成一个贴纸包，并清空工作区中的贴纸。
pub fn assemble(
    work_area: &WorkArea,
    out_dir: &Path,
    metadata: &PackMetadata,
    batch_index: usize,
) -> Result<PackSummary, StickerError> {
    let file_name = archive_name(&metadata.base_name, batch_index);
    let final_path = out_dir.join(&file_name);
    let part_path = out_dir.join(format!("{}.part", file_name));
    let title = metadata.title(batch_index);

    let entries = match write_archive(work_area, &part_path, metadata, &title) {
        Ok(entries) => entries,
        Err(err) => {
            if part_path.exists() {
                if let Err(cleanup) = fs::remove_file(&part_path) {
                    log::warn!("⚠️ 删除未完成的包 {} 失败：{}", part_path.display(), cleanup);
                }
            }
            return Err(err);
        }
    };

    fs::rename(&part_path, &final_path).map_err(|e| {
        StickerError::Archive(format!("重命名 {} 失败：{}", final_path.display(), e))
    })?;

    log::info!(
        "📦 贴纸包已写入 - 路径: {} 条目数: {}",
        final_path.display(),
        entries.len()
    );

    Ok(PackSummary {
        path: final_path,
        title,
        entries,
    })
}

fn write_archive(
    work_area: &WorkArea,
    part_path: &Path,
    metadata: &PackMetadata,
    title: &str,
) -> Result<Vec<PackEntry>, StickerError> {
    let icon_path = work_area.icon_path();
    let icon_bytes = fs::read(&icon_path).map_err(|e| {
        StickerError::FileSystem(format!("读取图标 {} 失败：{}", icon_path.display(), e))
    })?;

    let file = File::create(part_path).map_err(|e| {
        StickerError::Archive(format!("创建 {} 失败：{}", part_path.display(), e))
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut entries = Vec::new();

    add_entry(&mut writer, options, AUTHOR_ENTRY, metadata.author.as_bytes(), &mut entries)?;
    add_entry(&mut writer, options, TITLE_ENTRY, title.as_bytes(), &mut entries)?;
    add_entry(&mut writer, options, ICON_ENTRY, &icon_bytes, &mut entries)?;

    for path in work_area.stickers()? {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StickerError::Archive(format!("贴纸文件名无效：{}", path.display()))
            })?
            .to_string();
        let bytes = fs::read(&path).map_err(|e| {
            StickerError::FileSystem(format!("读取贴纸 {} 失败：{}", path.display(), e))
        })?;

        add_entry(&mut writer, options, &name, &bytes, &mut entries)?;
        remove_file(&path)?;
    }

    writer
        .finish()
        .map_err(|e| StickerError::Archive(format!("写入包目录失败：{}", e)))?;

    Ok(entries)
}

fn add_entry(
    writer: &mut ZipWriter<File>,
    options: SimpleFileOptions,
    name: &str,
    bytes: &[u8],
    entries: &mut Vec<PackEntry>,
) -> Result<(), StickerError> {
    writer
        .start_file(name, options)
        .map_err(|e| StickerError::Archive(format!("创建条目 {} 失败：{}", name, e)))?;
    writer
        .write_all(bytes)
        .map_err(|e| StickerError::Archive(format!("写入条目 {} 失败：{}", name, e)))?;

    entries.push(PackEntry {
        name: name.to_string(),
        size: bytes.len() as u64,
    });
    Ok(())
}
