//! embedded-graphics 适配
//! 上层的文字、图形绘制经由同一组裁剪原语写入画布

use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{
        Rgb565,
        raw::{RawData, RawU16},
    },
    primitives::Rectangle,
};
use gfx_canvas_common::{DisplaySink, FrameAllocator};

use super::framebuffer::Canvas;
use super::primitives::GfxPrimitives;

#[inline]
fn raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

/// 超过 i32 范围的尺寸按最大值处理，反正会被裁剪
#[inline]
fn extent(length: u32) -> i32 {
    i32::try_from(length).unwrap_or(i32::MAX)
}

impl<S: DisplaySink, A: FrameAllocator> OriginDimensions for Canvas<S, A> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl<S: DisplaySink, A: FrameAllocator> DrawTarget for Canvas<S, A> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel(x, y, raw(color));
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_rect_clipped(
            area.top_left.x,
            area.top_left.y,
            extent(area.size.width),
            extent(area.size.height),
            raw(color),
        );
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(raw(color));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        pixelcolor::Rgb565,
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    use crate::renderer::GfxPrimitives;
    use crate::renderer::test_support::canvas;

    #[test]
    fn test_size() {
        let canvas = canvas(12, 7);
        assert_eq!(canvas.size(), Size::new(12, 7));
        assert_eq!(GfxPrimitives::dimensions(&canvas), (12, 7));
    }

    #[test]
    fn test_clear() {
        let mut canvas = canvas(3, 3);
        canvas.clear(Rgb565::RED).unwrap();

        assert!(canvas.framebuffer().unwrap().iter().all(|&p| p == 0xF800));
    }

    #[test]
    fn test_filled_rectangle_clipped() {
        let mut canvas = canvas(4, 4);
        Rectangle::new(Point::new(-2, 2), Size::new(4, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut canvas)
            .unwrap();

        let fb = canvas.framebuffer().unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let inside = x < 2 && y >= 2;
                assert_eq!(fb[y * 4 + x] == 0x001F, inside, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_line_off_canvas_pixels_dropped() {
        let mut canvas = canvas(4, 4);
        Line::new(Point::new(-3, -3), Point::new(6, 6))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
            .draw(&mut canvas)
            .unwrap();

        let fb = canvas.framebuffer().unwrap();
        for i in 0..4 {
            assert_eq!(fb[i * 4 + i], 0xFFFF);
        }
        assert_eq!(fb.iter().filter(|&&p| p != 0).count(), 4);
    }
}
