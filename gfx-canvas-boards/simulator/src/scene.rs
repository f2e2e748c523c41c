//! 演示场景，用到画布的全部绘制原语

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
    text::Text,
};
use gfx_canvas_common::{DisplaySink, FrameAllocator, color, debug};
use gfx_canvas_graphics::{Canvas, GfxPrimitives};

const TILE: u16 = 48;
const SPRITE: u16 = 32;

/// 对角 RGB565 渐变，按行优先排列
fn gradient(size: u16) -> Vec<u16> {
    let scale = |v: u16| (u32::from(v) * 255 / u32::from(size.max(2) - 1)) as u8;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| color::rgb565(scale(x), scale(y), 255 - scale(x))))
        .collect()
}

/// 圆形精灵：中心不透明，向边缘逐渐淡出
fn sprite(size: u16) -> (Vec<u16>, Vec<u8>) {
    let radius = f32::from(size) / 2.0;
    let mut pixels = Vec::with_capacity(usize::from(size) * usize::from(size));
    let mut alpha = Vec::with_capacity(pixels.capacity());

    for y in 0..size {
        for x in 0..size {
            let dx = f32::from(x) + 0.5 - radius;
            let dy = f32::from(y) + 0.5 - radius;
            let falloff = 1.0 - ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
            pixels.push(color::YELLOW);
            alpha.push((falloff * 255.0) as u8);
        }
    }
    (pixels, alpha)
}

pub fn render<S, A>(canvas: &mut Canvas<S, A>) -> Result<(), Infallible>
where
    S: DisplaySink,
    A: FrameAllocator,
{
    let (width, height) = canvas.dimensions();
    let (w, h) = (i32::from(width), i32::from(height));
    debug!("Rendering demo scene on {}x{}", width, height);

    canvas.fill_screen(color::BLACK);

    // 压在左上角和右下角外侧的图块
    let tile = gradient(TILE);
    canvas.draw_bitmap(-i32::from(TILE) / 2, -i32::from(TILE) / 2, &tile, TILE, TILE);
    let swapped: Vec<u16> = tile.iter().map(|p| p.swap_bytes()).collect();
    canvas.draw_bitmap_swapped(
        w - i32::from(TILE) / 2,
        h - i32::from(TILE) / 2,
        &swapped,
        TILE,
        TILE,
    );

    // 扫描线条纹，从右往左画
    for y in (0..h).step_by(8) {
        canvas.draw_fast_hline(w - 1, y, -w / 4, color::BLUE);
    }
    canvas.draw_fast_vline(w / 2, -10, h + 20, color::GREEN);
    canvas.draw_rect(0, 0, w, h, color::WHITE);
    canvas.fill_rect_clipped(w / 4, h - 12, w / 2, 40, color::RED);

    Circle::new(Point::new(w / 2 - 20, h / 2 - 20), 40)
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::CYAN, 2))
        .draw(canvas)?;
    Text::new(
        "gfx-canvas",
        Point::new(4, 12),
        MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
    )
    .draw(canvas)?;

    // 透明度混合不做裁剪，只在放得下时绘制精灵
    if width >= SPRITE && height >= SPRITE {
        let (pixels, alpha) = sprite(SPRITE);
        let x = (w - i32::from(SPRITE)) / 2;
        let y = (h - i32::from(SPRITE)) / 2;
        canvas.draw_bitmap_with_alpha(x, y, &pixels, &alpha, SPRITE, SPRITE);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_canvas_common::CanvasConfig;

    fn render_on(width: u16, height: u16) -> Canvas<()> {
        let mut canvas = Canvas::new(CanvasConfig::new(width, height), ()).unwrap();
        canvas.initialize().unwrap();
        render(&mut canvas).unwrap();
        canvas
    }

    #[test]
    fn test_gradient_corners() {
        let tile = gradient(4);
        assert_eq!(tile.len(), 16);
        assert_eq!(tile[0], color::rgb565(0, 0, 255));
        assert_eq!(tile[15], color::rgb565(255, 255, 0));
    }

    #[test]
    fn test_sprite_alpha_falloff() {
        let (pixels, alpha) = sprite(8);
        assert_eq!(pixels.len(), 64);
        assert_eq!(alpha[0], 0);
        assert!(alpha[3 * 8 + 3] > 128);
    }

    #[test]
    fn test_render_border_and_sprite() {
        let canvas = render_on(64, 48);

        assert_eq!(canvas.get_pixel(10, 0), color::WHITE);
        assert_eq!(canvas.get_pixel(63, 20), color::WHITE);
        // 精灵中心与绿色竖线混合
        assert_eq!(canvas.get_pixel(32, 24), blend_center());
    }

    fn blend_center() -> u16 {
        let (_, alpha) = sprite(SPRITE);
        let a = alpha[usize::from(SPRITE / 2) * usize::from(SPRITE) + usize::from(SPRITE / 2)];
        gfx_canvas_graphics::blend_rgb565(color::YELLOW, color::GREEN, a)
    }

    #[test]
    fn test_render_tiny_canvas() {
        // 比所有位图都小，任何绘制都不能 panic
        let canvas = render_on(3, 2);
        assert_eq!(canvas.framebuffer().unwrap().len(), 6);
    }
}
