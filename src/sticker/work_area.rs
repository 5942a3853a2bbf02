//! # 临时工作区
//!
//! ## 设计思路
//!
//! 所有批次串行共用同一个临时目录：转换阶段写入贴纸，打包阶段逐个取走并删除。
//! 图标在首个批次前写入一次，跨批次保留，直到 `teardown` 才删除。
//!
//! ## 实现思路
//!
//! - `open`：目录不存在则创建，存在则清掉遗留的 `.webp` 文件。
//! - 写入与列举都使用显式路径，不依赖进程当前目录。

use std::fs;
use std::path::{Path, PathBuf};

use super::{OutputFormat, StickerError};

#[derive(Debug)]
pub struct WorkArea {
    root: PathBuf,
}

impl WorkArea {
    /// 打开（必要时创建）工作区，并清空遗留贴纸。
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StickerError> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| {
                StickerError::FileSystem(format!("创建临时目录 {} 失败：{}", root.display(), e))
            })?;
        }

        let area = Self { root };
        let stale = area.purge_stickers()?;
        if stale > 0 {
            log::warn!("🧹 清理临时目录中遗留的 {} 个贴纸文件", stale);
        }
        Ok(area)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn icon_path(&self) -> PathBuf {
        self.root.join(OutputFormat::Icon.file_name(""))
    }

    /// 写入一个输出文件，返回其路径。同名文件会被覆盖。
    pub fn write(
        &self,
        format: OutputFormat,
        stem: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StickerError> {
        let path = self.root.join(format.file_name(stem));
        if format == OutputFormat::Sticker && path.exists() {
            log::warn!("⚠️ 贴纸 {} 重名，后写入的文件会覆盖前一个", path.display());
        }

        fs::write(&path, bytes).map_err(|e| {
            StickerError::FileSystem(format!("写入 {} 失败：{}", path.display(), e))
        })?;
        Ok(path)
    }

    /// 当前工作区中的贴纸文件，按文件名排序。
    pub fn stickers(&self) -> Result<Vec<PathBuf>, StickerError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StickerError::FileSystem(format!("无法读取临时目录 {}：{}", self.root.display(), e))
        })?;

        let extension = OutputFormat::Sticker.extension();
        let mut stickers = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StickerError::FileSystem(format!("遍历临时目录失败：{}", e)))?
                .path();
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
                stickers.push(path);
            }
        }

        stickers.sort();
        Ok(stickers)
    }

    /// 删除全部贴纸文件，返回删除数量。
    pub fn purge_stickers(&self) -> Result<usize, StickerError> {
        let stickers = self.stickers()?;
        for path in &stickers {
            remove_file(path)?;
        }
        Ok(stickers.len())
    }

    /// 删除图标与工作区目录本身。目录中若还有其他文件则保留目录。
    pub fn teardown(self) -> Result<(), StickerError> {
        let icon = self.icon_path();
        if icon.exists() {
            remove_file(&icon)?;
        }

        if let Err(err) = fs::remove_dir(&self.root) {
            log::warn!("⚠️ 临时目录 {} 未能删除：{}", self.root.display(), err);
        }
        Ok(())
    }
}

pub(crate) fn remove_file(path: &Path) -> Result<(), StickerError> {
    fs::remove_file(path)
        .map_err(|e| StickerError::FileSystem(format!("删除 {} 失败：{}", path.display(), e)))
}
