//! 画布帧缓冲区
//! 在内存中缓存 RGB565 像素，刷新时整块传输到输出端

use alloc::vec::Vec;

use gfx_canvas_common::{
    AllocationPolicy, CanvasConfig, CanvasError, CanvasResult, DisplayError, DisplaySink,
    FrameAllocator, HeapAllocator, debug, error, info, warn,
};

use super::clip::clip_span;
use super::primitives::GfxPrimitives;

/// 内存画布
///
/// 构造时只确定尺寸，帧缓冲区在 [`Canvas::initialize`] 中分配。
/// 初始化之前调用任何绘制方法都会 panic
pub struct Canvas<S, A = HeapAllocator> {
    width: u16,
    height: u16,
    max_x: i32,
    max_y: i32,
    output_x: i16,
    output_y: i16,
    speed: Option<u32>,
    policy: AllocationPolicy,
    allocator: A,
    framebuffer: Option<Vec<u16>>,
    sink: S,
}

impl<S: DisplaySink> Canvas<S> {
    /// 使用全局堆分配帧缓冲区
    pub fn new(config: CanvasConfig, sink: S) -> CanvasResult<Self> {
        Self::with_allocator(config, sink, HeapAllocator)
    }
}

impl<S: DisplaySink, A: FrameAllocator> Canvas<S, A> {
    pub fn with_allocator(config: CanvasConfig, sink: S, allocator: A) -> CanvasResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            max_x: i32::from(config.width) - 1,
            max_y: i32::from(config.height) - 1,
            output_x: config.output_x,
            output_y: config.output_y,
            speed: config.speed,
            policy: config.allocation,
            allocator,
            framebuffer: None,
            sink,
        })
    }

    /// 初始化输出端并分配帧缓冲区
    ///
    /// 默认策略 [`AllocationPolicy::HalveOnFailure`] 下，完整分配失败后会以一半字节数重试，
    /// 成功后画布高度缩减为能容纳的整行数；[`AllocationPolicy::Exact`] 则直接报错。
    /// 重复调用不会重新分配
    pub fn initialize(&mut self) -> CanvasResult<()> {
        if self.framebuffer.is_some() {
            return Ok(());
        }

        if let Err(e) = self.sink.begin(self.speed) {
            error!("Display begin failed: {:?}", e);
            return Err(DisplayError::InitFailed.into());
        }

        let width = usize::from(self.width);
        let pixels = width * usize::from(self.height);
        let requested = pixels * 2;

        let framebuffer = match self.allocator.allocate(pixels) {
            Some(framebuffer) => framebuffer,
            None if self.policy == AllocationPolicy::HalveOnFailure => {
                // 一半字节数能放下的整行
                let rows = pixels / 2 / width;
                match self.allocate_rows(rows) {
                    Some(framebuffer) => {
                        warn!(
                            "Framebuffer degraded: {} of {} bytes, height {} -> {}",
                            rows * width * 2,
                            requested,
                            self.height,
                            rows
                        );
                        self.set_height(rows as u16);
                        framebuffer
                    }
                    None => {
                        error!("Framebuffer allocation failed ({} bytes)", requested);
                        return Err(CanvasError::AllocationFailure { requested });
                    }
                }
            }
            None => {
                error!("Framebuffer allocation failed ({} bytes)", requested);
                return Err(CanvasError::AllocationFailure { requested });
            }
        };

        info!(
            "Canvas initialized: {}x{}, {} bytes",
            self.width,
            self.height,
            framebuffer.len() * 2
        );
        self.framebuffer = Some(framebuffer);
        Ok(())
    }

    fn allocate_rows(&mut self, rows: usize) -> Option<Vec<u16>> {
        if rows == 0 {
            return None;
        }
        self.allocator.allocate(rows * usize::from(self.width))
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
        self.max_y = i32::from(height) - 1;
    }

    /// 将整个帧缓冲区传输到输出端
    pub fn flush(&mut self) -> CanvasResult<()> {
        let Some(framebuffer) = self.framebuffer.as_deref() else {
            return Err(CanvasError::NotInitialized);
        };

        debug!(
            "Flushing {}x{} canvas to ({}, {})",
            self.width, self.height, self.output_x, self.output_y
        );
        self.sink
            .draw_rgb565_bitmap(
                self.output_x,
                self.output_y,
                framebuffer,
                self.width,
                self.height,
            )
            .map_err(|e| {
                error!("Display transfer failed: {:?}", e);
                DisplayError::TransferFailed.into()
            })
    }

    /// 读取像素，调用方保证坐标在范围内
    pub fn get_pixel(&self, x: i32, y: i32) -> u16 {
        debug_assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        self.fb()[index]
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// 当前逻辑高度（降级分配后可能小于配置值）
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn output_offset(&self) -> (i16, i16) {
        (self.output_x, self.output_y)
    }

    pub fn is_initialized(&self) -> bool {
        self.framebuffer.is_some()
    }

    pub fn framebuffer(&self) -> Option<&[u16]> {
        self.framebuffer.as_deref()
    }

    pub fn framebuffer_mut(&mut self) -> Option<&mut [u16]> {
        self.framebuffer.as_deref_mut()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// 释放帧缓冲区，交还输出端
    pub fn release(self) -> S {
        self.sink
    }

    pub(super) fn bounds(&self) -> (i32, i32) {
        (self.max_x, self.max_y)
    }

    pub(super) fn contains(&self, x: i32, y: i32) -> bool {
        (0..=self.max_x).contains(&x) && (0..=self.max_y).contains(&y)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * usize::from(self.width) + x as usize
    }

    #[track_caller]
    pub(super) fn fb(&self) -> &[u16] {
        match self.framebuffer.as_deref() {
            Some(framebuffer) => framebuffer,
            None => not_initialized(),
        }
    }

    #[track_caller]
    pub(super) fn fb_mut(&mut self) -> &mut [u16] {
        match self.framebuffer.as_deref_mut() {
            Some(framebuffer) => framebuffer,
            None => not_initialized(),
        }
    }
}

#[cold]
#[track_caller]
fn not_initialized() -> ! {
    panic!("canvas framebuffer used before initialize()")
}

impl<S: DisplaySink, A: FrameAllocator> GfxPrimitives for Canvas<S, A> {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: u16) {
        debug_assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        self.fb_mut()[index] = color;
    }

    fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        let (max_x, max_y) = self.bounds();
        let width = usize::from(self.width);
        let framebuffer = self.fb_mut();

        if !(0..=max_x).contains(&x) {
            return;
        }
        let Some((y, h)) = clip_span(y, h, max_y) else {
            return;
        };

        framebuffer[y * width + x as usize..]
            .iter_mut()
            .step_by(width)
            .take(h)
            .for_each(|pixel| *pixel = color);
    }

    fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        let (max_x, max_y) = self.bounds();
        let width = usize::from(self.width);
        let framebuffer = self.fb_mut();

        if !(0..=max_y).contains(&y) {
            return;
        }
        let Some((x, w)) = clip_span(x, w, max_x) else {
            return;
        };

        let start = y as usize * width + x;
        framebuffer[start..start + w].fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        debug_assert!(
            w <= 0 || h <= 0 || (self.contains(x, y) && self.contains(x + w - 1, y + h - 1)),
            "rect ({x}, {y}, {w}, {h}) not clipped"
        );
        let width = usize::from(self.width);
        let framebuffer = self.fb_mut();
        if w <= 0 || h <= 0 {
            return;
        }

        let (w, h) = (w as usize, h as usize);
        let start = y as usize * width + x as usize;

        framebuffer[start..]
            .chunks_mut(width)
            .take(h)
            .for_each(|row| row[..w].fill(color));
    }
}
