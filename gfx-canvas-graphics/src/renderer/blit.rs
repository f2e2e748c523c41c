//! 位图绘制

use gfx_canvas_common::{DisplaySink, FrameAllocator, trace};

use super::blend::blend_rgb565;
use super::clip::clip_blit;
use super::framebuffer::Canvas;

impl<S: DisplaySink, A: FrameAllocator> Canvas<S, A> {
    /// 绘制 RGB565 位图（与画布字节序相同），自动裁剪
    ///
    /// `bitmap` 按行存储，行跨度为 `w`
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u16], w: u16, h: u16) {
        self.blit(x, y, bitmap, w, h, |pixel| pixel);
    }

    /// 绘制字节序相反的 RGB565 位图，每个像素交换高低字节后写入
    pub fn draw_bitmap_swapped(&mut self, x: i32, y: i32, bitmap: &[u16], w: u16, h: u16) {
        self.blit(x, y, bitmap, w, h, u16::swap_bytes);
    }

    fn blit(&mut self, x: i32, y: i32, bitmap: &[u16], w: u16, h: u16, convert: impl Fn(u16) -> u16) {
        let (max_x, max_y) = self.bounds();
        let width = usize::from(self.width());
        let framebuffer = self.fb_mut();

        let Some(clip) = clip_blit(x, y, w, h, max_x, max_y) else {
            trace!("Bitmap {}x{} at ({}, {}) is off canvas", w, h, x, y);
            return;
        };

        let mut src = clip.src_offset;
        let mut dst = clip.dst_y * width + clip.dst_x;
        for _ in 0..clip.height {
            // 源数据不足一整行时停止
            let Some(row) = bitmap.get(src..src + clip.width) else {
                break;
            };
            framebuffer[dst..dst + clip.width]
                .iter_mut()
                .zip(row)
                .for_each(|(pixel, &color)| *pixel = convert(color));

            src += clip.width + clip.src_skip;
            dst += width;
        }
    }

    /// 按 8 位 alpha 通道将位图混合到画布已有内容上
    ///
    /// 不做裁剪，调用方保证整个区域在画布内
    pub fn draw_bitmap_with_alpha(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u16],
        alpha: &[u8],
        w: u16,
        h: u16,
    ) {
        debug_assert!(
            w == 0 || h == 0 || (self.contains(x, y) && self.contains(x + i32::from(w) - 1, y + i32::from(h) - 1)),
            "alpha bitmap ({x}, {y}, {w}, {h}) not clipped"
        );
        let width = usize::from(self.width());
        let framebuffer = self.fb_mut();
        if w == 0 || h == 0 {
            return;
        }

        let w = usize::from(w);
        let rows = bitmap
            .chunks_exact(w)
            .zip(alpha.chunks_exact(w))
            .take(usize::from(h));

        for (j, (src_row, alpha_row)) in rows.enumerate() {
            let start = (y as usize + j) * width + x as usize;
            framebuffer[start..start + w]
                .iter_mut()
                .zip(src_row.iter().zip(alpha_row))
                .for_each(|(pixel, (&fg, &a))| *pixel = blend_rgb565(fg, *pixel, a));
        }
    }
}
