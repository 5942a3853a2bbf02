//! # 批次划分模块
//!
//! 按容量把贴纸列表切成连续批次，每个批次对应一个 `.wastickers` 包。
//! 长度在 `1..3` 之间的批次会追加与自身长度相同数量的空白贴纸，
//! 因此 1 张变 2 张、2 张变 4 张（不是补齐到 3 张）。

use super::config::MIN_BATCH_LEN;
use super::SourceImage;

/// 一个贴纸包的成员列表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 批次序号（从 0 开始），决定包名后缀。
    pub index: usize,
    pub items: Vec<SourceImage>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 补位空白图的数量。
    pub fn blank_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_blank()).count()
    }
}

/// 保序切分并对过短批次补位。`capacity` 为 0 时按 1 处理。
pub fn partition(items: Vec<SourceImage>, capacity: usize) -> Vec<Batch> {
    let capacity = capacity.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(capacity));
    let mut iter = items.into_iter().peekable();

    while iter.peek().is_some() {
        let chunk: Vec<SourceImage> = iter.by_ref().take(capacity).collect();
        let mut batch = Batch {
            index: batches.len(),
            items: chunk,
        };
        pad_batch(&mut batch);
        batches.push(batch);
    }

    batches
}

/// 长度 `L` 满足 `0 < L < 3` 时追加 `L` 张空白图，命名为 `blank0..blank{L-1}`。
pub fn pad_batch(batch: &mut Batch) {
    let length = batch.items.len();
    if length == 0 || length >= MIN_BATCH_LEN {
        return;
    }

    log::info!("🧩 批次 {} 仅有 {} 张图片，追加 {} 张空白贴纸", batch.index, length, length);
    batch.items.extend((0..length).map(SourceImage::blank));
}
