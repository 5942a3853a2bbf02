//! # 图片转贴纸包工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              main.rs（控制台：横幅 · 提示 · 状态输出）      │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<T, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ settings ─── stickers.json（目录 / 性能档位）         │
//! │  │                                                       │
//! │  ├─ sticker      扫描·规范化·分批·打包                    │
//! │  │   ├─ pipeline   512x512 画布 / 96x96 图标              │
//! │  │   ├─ batch      每 30 张一批 + 空白补位                │
//! │  │   └─ pack       .wastickers 包                         │
//! │  └─ storage      输出目录创建与汇总                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`settings`] | 可选设置文件的读取与默认值 |
//! | [`sticker`] | 输入扫描、图片规范化、批次划分、贴纸包写出 |
//! | [`storage`] | 输出目录的创建与汇总 |

pub mod error;
pub mod settings;
pub mod sticker;
pub mod storage;
