//! 帧缓冲区内存分配策略

use alloc::vec::Vec;

/// 帧缓冲区分配器
///
/// 只需回答一个问题：能否给出 `pixels` 个连续的 16 位像素。
/// 返回的缓冲区长度必须恰好为 `pixels`，内容清零
pub trait FrameAllocator {
    fn allocate(&mut self, pixels: usize) -> Option<Vec<u16>>;
}

/// 全局堆分配器（分配失败时返回 `None` 而不是中止）
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl FrameAllocator for HeapAllocator {
    fn allocate(&mut self, pixels: usize) -> Option<Vec<u16>> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(pixels).ok()?;
        buffer.resize(pixels, 0);
        Some(buffer)
    }
}

/// 固定预算分配器
///
/// 模拟内存受限的目标板：总共只有 `budget` 字节可用，
/// 每次成功分配都会从预算中扣除
#[derive(Debug, Clone, Copy)]
pub struct BudgetAllocator {
    budget: usize,
    used: usize,
}

impl BudgetAllocator {
    pub const fn new(budget: usize) -> Self {
        Self { budget, used: 0 }
    }

    /// 剩余可用字节数
    pub fn remaining(&self) -> usize {
        self.budget - self.used
    }
}

impl FrameAllocator for BudgetAllocator {
    fn allocate(&mut self, pixels: usize) -> Option<Vec<u16>> {
        let bytes = pixels.checked_mul(2)?;
        if bytes > self.remaining() {
            return None;
        }

        let buffer = HeapAllocator.allocate(pixels)?;
        self.used += bytes;
        Some(buffer)
    }
}

impl<A: FrameAllocator + ?Sized> FrameAllocator for &mut A {
    fn allocate(&mut self, pixels: usize) -> Option<Vec<u16>> {
        (**self).allocate(pixels)
    }
}
