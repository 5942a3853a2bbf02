//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `StickerHandler` 只负责流程编排，不直接与控制台交互。
//! 处理链路固定为：
//! 1. 扫描输入目录，取出图标并校验至少还有一张图片
//! 2. 转换图标到工作区（整次运行只做一次）
//! 3. 划分批次
//! 4. 逐批：转换贴纸到工作区 → 打包 → 工作区被清空
//!
//! ## 实现思路
//!
//! - 批次严格串行，工作区在批次之间复用。
//! - 记录 `convert/pack/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::batch::{partition, Batch};
use super::loader::{discover_inputs, ensure_images_present, split_icon};
use super::pack::{assemble, PackSummary};
use super::pipeline::{blank_image, encode, make_icon, normalize};
use super::source::SourceKind;
use super::{OutputFormat, PackMetadata, SourceImage, StickerConfig, StickerError, WorkArea};

/// 通过校验的输入：图标与其余贴纸图片。
#[derive(Debug, Clone)]
pub struct PreparedInputs {
    pub icon: SourceImage,
    pub images: Vec<SourceImage>,
}

/// 贴纸包生成器。
pub struct StickerHandler {
    config: StickerConfig,
}

impl StickerHandler {
    /// # 示例
    /// ```rust
    /// use images_to_stickers::sticker::{StickerConfig, StickerHandler};
    ///
    /// let handler = StickerHandler::new(StickerConfig::default());
    /// assert_eq!(handler.config().batch_capacity, 30);
    /// ```
    pub fn new(config: StickerConfig) -> Self {
        log::debug!(
            "⚙️ 贴纸处理器初始化 - 档位: {} 容量: {}",
            config.infer_performance_profile().as_str(),
            config.batch_capacity
        );
        Self { config }
    }

    pub fn config(&self) -> &StickerConfig {
        &self.config
    }

    /// 扫描并校验输入目录。图标缺失优先于图片为空报告。
    pub fn prepare_inputs(&self, input_dir: &Path) -> Result<PreparedInputs, StickerError> {
        let files = discover_inputs(input_dir)?;
        let (icon, images) = split_icon(files)?;
        ensure_images_present(&images)?;
        Ok(PreparedInputs { icon, images })
    }

    /// 将图标转换为 96x96 PNG 写入工作区。
    pub fn convert_icon(
        &self,
        icon: &SourceImage,
        work_area: &WorkArea,
    ) -> Result<PathBuf, StickerError> {
        let image = self.decode_source(icon)?;
        let thumbnail = make_icon(&image, self.config.resize_filter)?;
        let bytes = encode(OutputFormat::Icon, &thumbnail)?;
        let path = work_area.write(OutputFormat::Icon, icon.stem(), &bytes)?;

        log::info!("🖼️ 图标已生成 - 来源: {}", icon.file_name());
        Ok(path)
    }

    /// 将单张图片（或空白补位图）规范化并以 WebP 写入工作区。
    pub fn convert_source(
        &self,
        source: &SourceImage,
        work_area: &WorkArea,
    ) -> Result<PathBuf, StickerError> {
        let image = self.decode_source(source)?;
        let canvas = normalize(&image, self.config.resize_filter)?;
        let bytes = encode(OutputFormat::Sticker, &canvas)?;
        let path = work_area.write(OutputFormat::Sticker, source.stem(), &bytes)?;

        log::debug!("-> {} converted", source.file_name());
        Ok(path)
    }

    /// 转换整个批次，返回写入的贴纸数量。
    pub fn convert_batch(&self, batch: &Batch, work_area: &WorkArea) -> Result<usize, StickerError> {
        for source in &batch.items {
            self.convert_source(source, work_area)?;
        }
        Ok(batch.len())
    }

    /// 划分批次并逐批打包。每完成一个包调用一次 `on_pack`。
    pub fn build_packs<F>(
        &self,
        images: Vec<SourceImage>,
        work_area: &WorkArea,
        out_dir: &Path,
        metadata: &PackMetadata,
        mut on_pack: F,
    ) -> Result<Vec<PackSummary>, StickerError>
    where
        F: FnMut(&PackSummary),
    {
        let total_start = Instant::now();
        let batches = partition(images, self.config.batch_capacity);
        log::info!("🗂️ 共 {} 个批次", batches.len());

        let mut summaries = Vec::with_capacity(batches.len());
        for batch in &batches {
            let convert_start = Instant::now();
            let converted = self.convert_batch(batch, work_area)?;
            let convert_elapsed = convert_start.elapsed();

            let pack_start = Instant::now();
            let summary = assemble(work_area, out_dir, metadata, batch.index)?;
            let pack_elapsed = pack_start.elapsed();

            log::info!(
                "✅ 批次 {} 完成 - 贴纸: {}（空白: {}） convert={}ms pack={}ms",
                batch.index,
                converted,
                batch.blank_count(),
                convert_elapsed.as_millis(),
                pack_elapsed.as_millis()
            );

            on_pack(&summary);
            summaries.push(summary);
        }

        log::info!(
            "✅ 全部贴纸包完成 - 数量: {} total={}ms",
            summaries.len(),
            total_start.elapsed().as_millis()
        );
        Ok(summaries)
    }

    fn decode_source(&self, source: &SourceImage) -> Result<image::RgbaImage, StickerError> {
        match source.kind() {
            SourceKind::File(path) => {
                let raw = self.load_from_file(path, &self.config)?;
                self.decode_with_limits(raw, &self.config)
            }
            SourceKind::Blank => Ok(blank_image()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let image = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, 128, 255])
        });
        image.save(path).expect("failed to write test png");
    }

    #[test]
    fn prepare_inputs_reports_missing_icon_first() {
        let dir = TempDir::new().expect("tempdir failed");
        let handler = StickerHandler::new(StickerConfig::default());

        let result = handler.prepare_inputs(dir.path());

        assert!(matches!(result, Err(StickerError::MissingIcon)));
    }

    #[test]
    fn prepare_inputs_rejects_icon_only_folder() {
        let dir = TempDir::new().expect("tempdir failed");
        write_png(&dir.path().join("icon.png"), 10, 10);
        let handler = StickerHandler::new(StickerConfig::default());

        let result = handler.prepare_inputs(dir.path());

        assert!(matches!(result, Err(StickerError::EmptyInput)));
    }

    #[test]
    fn convert_icon_writes_96px_png() {
        let dir = TempDir::new().expect("tempdir failed");
        let icon_source = dir.path().join("icon.png");
        write_png(&icon_source, 300, 120);
        let area = WorkArea::open(dir.path().join("temp")).expect("open failed");
        let handler = StickerHandler::new(StickerConfig::default());

        let path = handler
            .convert_icon(
                &SourceImage::from_path(icon_source).expect("valid path"),
                &area,
            )
            .expect("convert icon failed");

        assert_eq!(path, area.icon_path());
        let icon = image::open(&path).expect("icon should decode");
        assert_eq!((icon.width(), icon.height()), (96, 96));
    }

    #[test]
    fn convert_batch_writes_blank_placeholders() {
        let dir = TempDir::new().expect("tempdir failed");
        let source = dir.path().join("cat.png");
        write_png(&source, 64, 32);
        let area = WorkArea::open(dir.path().join("temp")).expect("open failed");
        let handler = StickerHandler::new(StickerConfig::default());

        let batches = partition(vec![SourceImage::from_path(source).expect("valid path")], 30);
        let written = handler.convert_batch(&batches[0], &area).expect("convert failed");

        assert_eq!(written, 2);
        let names: Vec<String> = area
            .stickers()
            .expect("list failed")
            .iter()
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["blank0.webp", "cat.webp"]);

        let blank = image::open(area.root().join("blank0.webp")).expect("blank should decode");
        assert_eq!((blank.width(), blank.height()), (512, 512));
        assert!(blank.to_rgba8().pixels().all(|pixel| pixel[3] == 0));
    }

    #[test]
    fn corrupt_image_aborts_conversion() {
        let dir = TempDir::new().expect("tempdir failed");
        let source = dir.path().join("broken.png");
        fs::write(&source, [137_u8, 80, 78, 71, 13, 10, 26, 10, 0, 0]).expect("write failed");
        let area = WorkArea::open(dir.path().join("temp")).expect("open failed");
        let handler = StickerHandler::new(StickerConfig::default());

        let result =
            handler.convert_source(&SourceImage::from_path(source).expect("valid path"), &area);

        assert!(result.is_err());
        assert!(area.stickers().expect("list failed").is_empty());
    }
}
