//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → RGBA → 画布 → 编码字节”的过程集中管理，并在解码前增加资源上限控制。
//! 解码后立即统一为 RGBA，之后的几何计算与合成与输入格式无关。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸，按像素/内存上限快速拒绝
//! 2. 完整解码并转换为 RGBA
//! 3. 贴纸：按方向等比缩放到一边为 512，居中贴到全新的 512x512 透明画布
//! 4. 图标：直接拉伸到 96x96（不保持比例）
//! 5. 贴纸编码为带透明通道的有损 WebP，图标编码为 PNG

use fast_image_resize as fr;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use image::imageops::FilterType;
use std::io::Cursor;

use super::config::{CANVAS_SIZE, ICON_SIZE, WEBP_QUALITY};
use super::source::RawImageData;
use super::{OutputFormat, StickerConfig, StickerError, StickerHandler};

/// 宽小于高视为竖图；正方形按横图处理。
pub fn is_vertical(width: u32, height: u32) -> bool {
    width < height
}

/// 计算等比缩放后的尺寸：长边固定为 512，短边向下取整（至少 1 像素）。
pub fn scaled_dimensions(width: u32, height: u32) -> (u32, u32) {
    let canvas = CANVAS_SIZE as u64;
    if is_vertical(width, height) {
        let scaled_width = (width as u64 * canvas) / height as u64;
        ((scaled_width as u32).max(1), CANVAS_SIZE)
    } else {
        let scaled_height = (height as u64 * canvas) / width as u64;
        (CANVAS_SIZE, (scaled_height as u32).max(1))
    }
}

/// 居中偏移（向下取整）。
pub fn center_offset(scaled_width: u32, scaled_height: u32) -> (u32, u32) {
    (
        (CANVAS_SIZE - scaled_width) / 2,
        (CANVAS_SIZE - scaled_height) / 2,
    )
}

/// 将任意尺寸图片规范化为 512x512 透明画布上的居中贴纸。
pub fn normalize(image: &RgbaImage, filter: FilterType) -> Result<RgbaImage, StickerError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StickerError::Decode(format!("图片尺寸无效：{}x{}", width, height)));
    }

    let (scaled_width, scaled_height) = scaled_dimensions(width, height);
    let scaled = resize_exact(image, scaled_width, scaled_height, filter)?;

    let mut canvas = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    let (x, y) = center_offset(scaled_width, scaled_height);
    paste_with_alpha_mask(&mut canvas, &scaled, x, y);

    Ok(canvas)
}

/// 将图标拉伸为 96x96。
pub fn make_icon(image: &RgbaImage, filter: FilterType) -> Result<RgbaImage, StickerError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StickerError::Decode(format!("图标尺寸无效：{}x{}", width, height)));
    }
    resize_exact(image, ICON_SIZE, ICON_SIZE, filter)
}

/// 补位用的全透明空白图。
pub fn blank_image() -> RgbaImage {
    RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE)
}

/// 按输出格式编码。
pub fn encode(format: OutputFormat, image: &RgbaImage) -> Result<Vec<u8>, StickerError> {
    match format {
        OutputFormat::Sticker => encode_webp(image),
        OutputFormat::Icon => encode_png(image),
    }
}

/// 以源图自身 alpha 作为蒙版贴到画布。
///
/// 蒙版作用于全部四个通道（含 alpha）：`(src * a + dst * (255 - a) + 127) / 255`。
/// 画布为全新透明画布时，半透明像素的颜色与 alpha 都会按 `a / 255` 衰减。
fn paste_with_alpha_mask(canvas: &mut RgbaImage, source: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, pixel) in source.enumerate_pixels() {
        let mask = pixel[3];
        if mask == 0 {
            continue;
        }
        let target = canvas.get_pixel_mut(x + sx, y + sy);
        for channel in 0..4 {
            target[channel] = blend_channel(pixel[channel], target[channel], mask);
        }
    }
}

fn blend_channel(source: u8, destination: u8, mask: u8) -> u8 {
    let mask = mask as u32;
    ((source as u32 * mask + destination as u32 * (255 - mask) + 127) / 255) as u8
}

fn resize_exact(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, StickerError> {
    if image.dimensions() == (target_width, target_height) {
        return Ok(image.clone());
    }

    match resize_with_fast_image_resize(image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
            Ok(image::imageops::resize(image, target_width, target_height, filter))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, StickerError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| StickerError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| StickerError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| StickerError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

fn encode_webp(image: &RgbaImage) -> Result<Vec<u8>, StickerError> {
    let (width, height) = image.dimensions();
    let encoded = webp::Encoder::from_rgba(image.as_raw(), width, height)
        .encode_simple(false, WEBP_QUALITY)
        .map_err(|e| StickerError::Encode(format!("WebP 编码失败：{:?}", e)))?;
    Ok(encoded.to_vec())
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, StickerError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| StickerError::Encode(format!("PNG 编码失败：{}", e)))?;
    Ok(cursor.into_inner())
}

impl StickerHandler {
    /// 将原始字节解码为 RGBA 图像。
    pub(crate) fn decode_with_limits(
        &self,
        raw: RawImageData,
        config: &StickerConfig,
    ) -> Result<RgbaImage, StickerError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded: DynamicImage = image::load_from_memory(&raw.bytes)
            .map_err(|e| StickerError::Decode(format!("图片解码失败（{}）：{}", raw.source_hint, e)))?;
        let rgba = decoded.to_rgba8();

        log::debug!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{}",
            raw.source_hint,
            rgba.width(),
            rgba.height()
        );

        Ok(rgba)
    }

    /// 仅通过内存中的图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), StickerError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| StickerError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| StickerError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(
        config: &StickerConfig,
        width: u32,
        height: u32,
    ) -> Result<(), StickerError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| StickerError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(StickerError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &StickerConfig,
        width: u32,
        height: u32,
    ) -> Result<(), StickerError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| StickerError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(StickerError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
