//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“输入引用”和“流水线中间结果”解耦：
//! - `SourceImage` 表示一张待转换的图片（真实文件或补位空白图），名称在扫描时一次性提取
//! - `RawImageData` 表示已加载但未解码的字节
//! - `OutputFormat` 是封闭的输出格式集合，图标与贴纸各占一个分支
//! - `PackMetadata` 表示贴纸包的作者与标题

use std::path::{Path, PathBuf};

/// 图片来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// 输入目录中的真实文件。
    File(PathBuf),
    /// 补位用的全透明空白图，不对应任何文件。
    Blank,
}

/// 一张待转换的图片。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    kind: SourceKind,
    /// 输出文件名（不含扩展名）。
    stem: String,
    /// 原始扩展名（保持大小写）；空白图为空字符串。
    extension: String,
}

impl SourceImage {
    /// 由文件路径构造；无法取得文件名时返回 `None`。
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let stem = path.file_stem()?.to_str()?.to_string();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();

        Some(Self {
            kind: SourceKind::File(path),
            stem,
            extension,
        })
    }

    /// 构造第 `index` 张补位空白图，输出名为 `blank{index}`。
    pub fn blank(index: usize) -> Self {
        Self {
            kind: SourceKind::Blank,
            stem: format!("blank{}", index),
            extension: String::new(),
        }
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            SourceKind::File(path) => Some(path),
            SourceKind::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, SourceKind::Blank)
    }

    /// 带扩展名的文件名，用于日志与图标匹配。
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.stem.clone()
        } else {
            format!("{}.{}", self.stem, self.extension)
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 输出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 96x96 无损 PNG 图标。
    Icon,
    /// 512x512 带透明通道的有损 WebP 贴纸。
    Sticker,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Icon => "png",
            Self::Sticker => "webp",
        }
    }

    /// 工作区中的输出文件名。图标固定为 `icon.png`。
    pub fn file_name(self, stem: &str) -> String {
        match self {
            Self::Icon => format!("icon.{}", self.extension()),
            Self::Sticker => format!("{}.{}", stem, self.extension()),
        }
    }
}

/// 贴纸包元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackMetadata {
    pub author: String,
    pub base_name: String,
}

impl PackMetadata {
    pub fn new(author: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            base_name: base_name.into(),
        }
    }

    /// 第 `batch_index` 个包的标题：首包不加后缀，其余为 `-<batch_index + 1>`。
    pub fn title(&self, batch_index: usize) -> String {
        format!("{}{}", self.base_name, pack_suffix(batch_index))
    }
}

pub(crate) fn pack_suffix(batch_index: usize) -> String {
    if batch_index == 0 {
        String::new()
    } else {
        format!("-{}", batch_index + 1)
    }
}
