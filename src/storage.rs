//! 输出目录管理模块
//!
//! # 设计思路
//!
//! 统一管理贴纸包的输出目录：目录不存在时自动创建，并在运行结束时汇总目录内容。
//!
//! # 实现思路
//!
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 输出目录信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub path: String,
    pub total_size: u64,
    pub file_count: u64,
}

/// 确保目录存在并返回其路径。
///
/// # 返回
/// - `Ok(PathBuf)` — 可用的目录
/// - `Err(AppError::Storage)` — 名称为空或无法创建目录
pub fn ensure_dir(dir: &Path) -> Result<PathBuf, AppError> {
    if dir.as_os_str().is_empty() {
        return Err(AppError::Storage("目录名称不能为空".to_string()));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Storage(format!("创建目录 '{}' 失败: {}", dir.display(), e))
        })?;
    } else if !dir.is_dir() {
        return Err(AppError::Storage(format!(
            "'{}' 已存在但不是目录",
            dir.display()
        )));
    }

    Ok(dir.to_path_buf())
}

/// 获取目录信息（路径 + 占用大小 + 文件数）
pub fn dir_info(dir: &Path) -> Result<StorageInfo, AppError> {
    let mut total_size: u64 = 0;
    let mut file_count: u64 = 0;

    for entry in fs::read_dir(dir)?.flatten() {
        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                total_size += metadata.len();
                file_count += 1;
            }
        }
    }

    Ok(StorageInfo {
        path: dir.to_string_lossy().to_string(),
        total_size,
        file_count,
    })
}
