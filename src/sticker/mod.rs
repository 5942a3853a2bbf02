//! # 贴纸处理模块（sticker）
//!
//! ## 设计思路
//!
//! 该模块将“输入扫描 → 加载校验 → 解码规范化 → 批次划分 → 打包”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线
//! - `loader`：负责输入目录扫描、图标识别、文件加载与安全校验
//! - `pipeline`：负责解码、像素限制、缩放、居中合成与编码
//! - `batch`：负责批次划分与空白补位
//! - `pack`：负责写出 `.wastickers` 包并清空工作区
//! - `work_area`：批次间共用的临时目录
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! main.rs（提示、状态输出）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（扫描 + 图标 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 规范化 512x512 / 图标 96x96 + 编码）
//!    ├─ batch.rs（每 30 张一批 + 空白补位）
//!    └─ pack.rs（author/title/icon + 贴纸 → .wastickers）
//! ```

mod config;
mod error;
mod handler;
mod source;
mod work_area;

pub mod batch;
pub mod loader;
pub mod pack;
pub mod pipeline;

pub use batch::{partition, Batch};
pub use config::{
    StickerConfig, StickerPerformanceProfile, BATCH_CAPACITY, CANVAS_SIZE, ICON_SIZE,
    MIN_BATCH_LEN, WEBP_QUALITY,
};
pub use error::StickerError;
pub use handler::{PreparedInputs, StickerHandler};
pub use pack::{assemble, archive_name, PackEntry, PackSummary};
pub use source::{OutputFormat, PackMetadata, SourceImage, SourceKind};
pub use work_area::WorkArea;
