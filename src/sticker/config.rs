//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `StickerConfig`，画布尺寸、图标尺寸与 WebP 质量属于
//! 输出格式本身，保持为常量，不进入配置。
//! 性能档位（quality / balanced / speed）作为高层语义，映射到缩放滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的平衡配置。
//! - `StickerPerformanceProfile` 负责档位字符串解析与反向输出。
//! - `apply_performance_profile` 将档位转换为具体滤镜。
//! - `infer_performance_profile` 用于从当前配置反推档位（日志展示）。

use image::imageops::FilterType;

use super::StickerError;

/// 贴纸画布边长（像素）。
pub const CANVAS_SIZE: u32 = 512;
/// 图标边长（像素）。
pub const ICON_SIZE: u32 = 96;
/// 单个贴纸包最多容纳的贴纸数量。
pub const BATCH_CAPACITY: usize = 30;
/// 低于该数量的批次会补充空白贴纸。
pub const MIN_BATCH_LEN: usize = 3;
/// WebP 有损编码质量，与常见编码器默认值一致。
pub const WEBP_QUALITY: f32 = 80.0;

/// 贴纸处理配置。
#[derive(Debug, Clone)]
pub struct StickerConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 缩放滤镜策略。
    pub resize_filter: FilterType,
    /// 每个贴纸包的容量。
    pub batch_capacity: usize,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024,
            max_decoded_pixels: 200_000_000,
            max_decoded_bytes: 800 * 1024 * 1024,
            resize_filter: FilterType::CatmullRom,
            batch_capacity: BATCH_CAPACITY,
        }
    }
}

/// 缩放性能档位。
///
/// - `Quality`：Lanczos3，边缘最锐利
/// - `Balanced`：CatmullRom（双三次）
/// - `Speed`：Triangle（双线性）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerPerformanceProfile {
    Quality,
    Balanced,
    Speed,
}

impl StickerPerformanceProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use images_to_stickers::sticker::StickerPerformanceProfile;
    ///
    /// let p = StickerPerformanceProfile::from_str(" Balanced ")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), images_to_stickers::sticker::StickerError>(())
    /// ```
    pub fn from_str(profile: &str) -> Result<Self, StickerError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(StickerError::InvalidFormat(format!(
                "未知性能档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl StickerConfig {
    /// 基于当前滤镜反推性能档位。
    pub fn infer_performance_profile(&self) -> StickerPerformanceProfile {
        match self.resize_filter {
            FilterType::Lanczos3 => StickerPerformanceProfile::Quality,
            FilterType::Triangle | FilterType::Nearest => StickerPerformanceProfile::Speed,
            FilterType::CatmullRom | FilterType::Gaussian => StickerPerformanceProfile::Balanced,
        }
    }

    /// 应用指定性能档位到实际参数。
    pub fn apply_performance_profile(&mut self, profile: StickerPerformanceProfile) {
        self.resize_filter = match profile {
            StickerPerformanceProfile::Quality => FilterType::Lanczos3,
            StickerPerformanceProfile::Balanced => FilterType::CatmullRom,
            StickerPerformanceProfile::Speed => FilterType::Triangle,
        };
    }

    /// 以指定档位构造配置。
    pub fn with_profile(profile: StickerPerformanceProfile) -> Self {
        let mut config = Self::default();
        config.apply_performance_profile(profile);
        config
    }
}
