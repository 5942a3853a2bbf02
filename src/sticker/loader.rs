//! # 扫描与加载模块
//!
//! ## 设计思路
//!
//! 统一处理输入目录扫描、图标识别与本地文件字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败：图标缺失、没有贴纸图片、文件过大或内容不是图片时，都在转换开始前终止。
//!
//! ## 实现思路
//!
//! - 扫描：按 `jpg → png → webp` 分组收集，组内按文件名排序，保证批次划分稳定。
//! - 图标：文件名匹配 `icon\.(jpg|png)$` 的第一项，从贴纸列表中移除。
//! - 文件：存在性 + metadata 体积限制 + 读取 + 魔数签名校验。

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use super::source::RawImageData;
use super::{SourceImage, StickerConfig, StickerError, StickerHandler};

/// 参与扫描的扩展名，顺序即输出顺序（区分大小写）。
pub const INPUT_EXTENSIONS: [&str; 3] = ["jpg", "png", "webp"];

static ICON_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"icon\.(jpg|png)$").expect("icon pattern is a valid regex"));

/// 扫描输入目录，返回全部候选图片（含图标）。
pub fn discover_inputs(input_dir: &Path) -> Result<Vec<SourceImage>, StickerError> {
    let entries = fs::read_dir(input_dir).map_err(|e| {
        StickerError::FileSystem(format!("无法读取输入目录 {}：{}", input_dir.display(), e))
    })?;

    let mut groups: [Vec<SourceImage>; INPUT_EXTENSIONS.len()] = Default::default();

    for entry in entries {
        let entry = entry
            .map_err(|e| StickerError::FileSystem(format!("遍历输入目录失败：{}", e)))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(source) = SourceImage::from_path(path) else {
            log::debug!("🚫 跳过无法识别文件名的条目：{:?}", entry.file_name());
            continue;
        };

        if let Some(group) = INPUT_EXTENSIONS
            .iter()
            .position(|ext| *ext == source.extension())
        {
            groups[group].push(source);
        }
    }

    let mut files = Vec::new();
    for mut group in groups {
        group.sort_by_key(|source| source.file_name());
        files.extend(group);
    }

    log::info!("📁 扫描完成 - 目录: {} 图片数: {}", input_dir.display(), files.len());
    Ok(files)
}

pub fn is_icon_name(file_name: &str) -> bool {
    ICON_PATTERN.is_match(file_name)
}

/// 从扫描结果中取出图标，返回 `(图标, 其余图片)`。
pub fn split_icon(
    mut files: Vec<SourceImage>,
) -> Result<(SourceImage, Vec<SourceImage>), StickerError> {
    let index = files
        .iter()
        .position(|source| is_icon_name(&source.file_name()))
        .ok_or(StickerError::MissingIcon)?;

    let icon = files.remove(index);
    Ok((icon, files))
}

/// 去掉图标后至少要有一张贴纸图片。
pub fn ensure_images_present(images: &[SourceImage]) -> Result<(), StickerError> {
    if images.is_empty() {
        return Err(StickerError::EmptyInput);
    }
    Ok(())
}

impl StickerHandler {
    /// 从本地路径加载图片原始字节。
    pub(crate) fn load_from_file(
        &self,
        path: &Path,
        config: &StickerConfig,
    ) -> Result<RawImageData, StickerError> {
        log::debug!("📁 读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(StickerError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = fs::metadata(path)
            .map_err(|e| StickerError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > config.max_file_size {
            return Err(StickerError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = fs::read(path)
            .map_err(|e| StickerError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    fn validate_image_signature(bytes: &[u8]) -> Result<(), StickerError> {
        if bytes.is_empty() {
            return Err(StickerError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| StickerError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(StickerError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).expect("create fixture file failed");
    }

    fn names(files: &[SourceImage]) -> Vec<String> {
        files.iter().map(SourceImage::file_name).collect()
    }

    #[test]
    fn discover_groups_by_extension_then_sorts_by_name() {
        let dir = TempDir::new().expect("tempdir failed");
        for name in ["b.png", "z.jpg", "a.webp", "a.png", "notes.txt", "c.JPG", "a.jpg"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("nested.png")).expect("create nested dir failed");

        let files = discover_inputs(dir.path()).expect("discover failed");

        assert_eq!(names(&files), vec!["a.jpg", "z.jpg", "a.png", "b.png", "a.webp"]);
    }

    #[test]
    fn discover_reports_missing_directory() {
        let dir = TempDir::new().expect("tempdir failed");
        let result = discover_inputs(&dir.path().join("missing"));
        assert!(matches!(result, Err(StickerError::FileSystem(_))));
    }

    #[test]
    fn icon_pattern_requires_jpg_or_png_suffix() {
        assert!(is_icon_name("icon.png"));
        assert!(is_icon_name("icon.jpg"));
        assert!(is_icon_name("my-icon.png"));
        assert!(!is_icon_name("icon.webp"));
        assert!(!is_icon_name("icon.PNG"));
        assert!(!is_icon_name("icons.png"));
    }

    #[test]
    fn split_icon_removes_icon_from_list() {
        let files = vec![
            SourceImage::from_path("input/a.jpg").expect("valid path"),
            SourceImage::from_path("input/icon.png").expect("valid path"),
            SourceImage::from_path("input/b.png").expect("valid path"),
        ];

        let (icon, rest) = split_icon(files).expect("icon should be found");

        assert_eq!(icon.file_name(), "icon.png");
        assert_eq!(names(&rest), vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn split_icon_fails_without_icon() {
        let files = vec![SourceImage::from_path("input/a.jpg").expect("valid path")];
        assert!(matches!(split_icon(files), Err(StickerError::MissingIcon)));
    }

    #[test]
    fn empty_image_list_is_rejected() {
        assert!(matches!(ensure_images_present(&[]), Err(StickerError::EmptyInput)));
    }

    #[test]
    fn load_from_file_rejects_non_image_payload() {
        let dir = TempDir::new().expect("tempdir failed");
        let path = dir.path().join("fake.png");
        fs::write(&path, b"<html><body>not an image</body></html>").expect("write failed");

        let handler = StickerHandler::new(StickerConfig::default());
        let result = handler.load_from_file(&path, &StickerConfig::default());

        assert!(matches!(result, Err(StickerError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_file_enforces_size_limit() {
        let dir = TempDir::new().expect("tempdir failed");
        let path = dir.path().join("big.png");
        fs::write(&path, vec![0_u8; 64]).expect("write failed");

        let mut config = StickerConfig::default();
        config.max_file_size = 32;
        let handler = StickerHandler::new(config.clone());

        let result = handler.load_from_file(&path, &config);

        assert!(matches!(result, Err(StickerError::ResourceLimit(_))));
    }
}
