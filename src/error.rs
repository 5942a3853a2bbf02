//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，入口层只处理这一种错误。
//! 任何错误都会终止整次运行，不做跳过或重试。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `StickerError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::sticker::StickerError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 贴纸流水线错误（扫描 / 解码 / 编码 / 打包）
    #[error("{0}")]
    Sticker(#[from] StickerError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 设置文件无法读取或解析
    #[error("设置错误: {0}")]
    Settings(String),

    /// 交互输入失败或无效
    #[error("输入无效: {0}")]
    Prompt(String),
}

impl AppError {
    /// 输入校验类错误的修复提示。
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::Sticker(err) => err.remediation(),
            _ => None,
        }
    }
}
