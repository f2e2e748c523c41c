//! 显示输出 trait

use core::convert::Infallible;

/// 显示输出端
///
/// 画布只在两个时刻接触物理屏幕：
/// - 初始化时调用 [`DisplaySink::begin`]，传入传输速度提示
/// - 刷新时调用 [`DisplaySink::draw_rgb565_bitmap`]，一次性传输整块位图
///
/// 传输可能阻塞在硬件 I/O 上，这不在画布的控制范围内
pub trait DisplaySink {
    /// 错误类型
    type Error: core::fmt::Debug;

    /// 初始化输出设备
    ///
    /// `speed` 为传输速度提示（如 SPI 频率），`None` 表示使用驱动默认值
    fn begin(&mut self, speed: Option<u32>) -> Result<(), Self::Error>;

    /// 将一块 RGB565 位图传输到屏幕坐标 `(x, y)` 处
    ///
    /// `pixels` 按行存储，行跨度为 `width`，长度至少为 `width * height`
    fn draw_rgb565_bitmap(
        &mut self,
        x: i16,
        y: i16,
        pixels: &[u16],
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error>;
}

/// 空输出端（无屏幕的平台，或只需要离屏渲染时）
impl DisplaySink for () {
    type Error = Infallible;

    fn begin(&mut self, _speed: Option<u32>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn draw_rgb565_bitmap(
        &mut self,
        _x: i16,
        _y: i16,
        _pixels: &[u16],
        _width: u16,
        _height: u16,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    type Error = S::Error;

    fn begin(&mut self, speed: Option<u32>) -> Result<(), Self::Error> {
        (**self).begin(speed)
    }

    fn draw_rgb565_bitmap(
        &mut self,
        x: i16,
        y: i16,
        pixels: &[u16],
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        (**self).draw_rgb565_bitmap(x, y, pixels, width, height)
    }
}
