//! 绘图原语接口
//!
//! 文字、图形等上层绘制只依赖这组原语，不关心底层是画布还是真实屏幕

use super::clip::clip_span;

pub trait GfxPrimitives {
    /// 逻辑尺寸 `(宽, 高)`
    fn dimensions(&self) -> (u16, u16);

    /// 写单个像素，调用方保证坐标在范围内
    fn write_pixel(&mut self, x: i32, y: i32, color: u16);

    /// 竖线，自带裁剪；`h` 为负时向上延伸
    fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16);

    /// 横线，自带裁剪；`w` 为负时向左延伸
    fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16);

    /// 填充矩形，调用方保证矩形已裁剪到范围内
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16);

    /// 带边界检查的单像素绘制，超出范围时什么都不做
    fn draw_pixel(&mut self, x: i32, y: i32, color: u16) {
        let (width, height) = self.dimensions();
        if (0..i32::from(width)).contains(&x) && (0..i32::from(height)).contains(&y) {
            self.write_pixel(x, y, color);
        }
    }

    /// 任意矩形（宽高可为负）先裁剪再填充
    fn fill_rect_clipped(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let (width, height) = self.dimensions();
        let Some((x, w)) = clip_span(x, w, i32::from(width) - 1) else {
            return;
        };
        let Some((y, h)) = clip_span(y, h, i32::from(height) - 1) else {
            return;
        };

        self.fill_rect(x as i32, y as i32, w as i32, h as i32, color);
    }

    fn fill_screen(&mut self, color: u16) {
        let (width, height) = self.dimensions();
        self.fill_rect(0, 0, i32::from(width), i32::from(height), color);
    }

    /// 矩形边框
    fn draw_rect(&mut self, mut x: i32, mut y: i32, mut w: i32, mut h: i32, color: u16) {
        if w == 0 || h == 0 {
            return;
        }
        if w < 0 {
            x = x.saturating_add(w + 1);
            w = w.saturating_neg();
        }
        if h < 0 {
            y = y.saturating_add(h + 1);
            h = h.saturating_neg();
        }

        self.draw_fast_hline(x, y, w, color);
        self.draw_fast_hline(x, y.saturating_add(h - 1), w, color);
        self.draw_fast_vline(x, y, h, color);
        self.draw_fast_vline(x.saturating_add(w - 1), y, h, color);
    }
}
