//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载贴纸流水线中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 输出格式使用封闭枚举 `OutputFormat` 表达，因此不存在“不支持的输出格式”分支。

/// 贴纸处理统一错误类型。
///
/// 该类型会在入口层被上转为 `AppError`，任何一个分支都会终止整次运行。
#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    #[error(
        "缺少图标文件：请确认输入目录中存在 icon.png 或 icon.jpg（ERROR: ICON FILE IS MISSING OR NOT FOUND）"
    )]
    MissingIcon,

    #[error("输入目录中没有可转换的图片（ERROR: There are no images in the input folder）")]
    EmptyInput,

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("打包错误：{0}")]
    Archive(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl StickerError {
    /// 输入校验类错误附带的修复提示，其他错误返回 `None`。
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::MissingIcon => Some(
                "please be sure that there is an icon.png/jpg in the input folder",
            ),
            Self::EmptyInput => Some("add at least one .jpg/.png/.webp image besides the icon"),
            _ => None,
        }
    }
}
