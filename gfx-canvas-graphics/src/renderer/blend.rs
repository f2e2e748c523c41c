use gfx_canvas_common::color::{blue5, green6, pack, red5};

/// RGB565 alpha 混合
///
/// 各通道独立计算 `(fg * alpha + bg * (255 - alpha)) / 255`，整数除法向下取整。
/// `alpha = 0` 得到背景色，`alpha = 255` 得到前景色
#[inline]
pub fn blend_rgb565(fg: u16, bg: u16, alpha: u8) -> u16 {
    let alpha = u32::from(alpha);
    let inverse = 255 - alpha;
    let mix = |fg: u8, bg: u8| ((u32::from(fg) * alpha + u32::from(bg) * inverse) / 255) as u8;

    pack(
        mix(red5(fg), red5(bg)),
        mix(green6(fg), green6(bg)),
        mix(blue5(fg), blue5(bg)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_canvas_common::color::{BLACK, BLUE, GREEN, RED, WHITE};

    const SAMPLES: [u16; 8] = [BLACK, WHITE, RED, GREEN, BLUE, 0x1234, 0xA5A5, 0x7BEF];

    #[test]
    fn test_alpha_zero_keeps_background() {
        for fg in SAMPLES {
            for bg in SAMPLES {
                assert_eq!(blend_rgb565(fg, bg, 0), bg);
            }
        }
    }

    #[test]
    fn test_alpha_full_takes_foreground() {
        for fg in SAMPLES {
            for bg in SAMPLES {
                assert_eq!(blend_rgb565(fg, bg, 255), fg);
            }
        }
    }

    #[test]
    fn test_half_alpha_within_one_lsb() {
        let exact = |fg: u8, bg: u8| (f64::from(fg) * 128.0 + f64::from(bg) * 127.0) / 255.0;

        for fg_channel in 0..=63u8 {
            for bg_channel in 0..=63u8 {
                let fg = pack(fg_channel & 0x1F, fg_channel, fg_channel & 0x1F);
                let bg = pack(bg_channel & 0x1F, bg_channel, bg_channel & 0x1F);
                let out = blend_rgb565(fg, bg, 128);

                let checks = [
                    (red5(out), exact(red5(fg), red5(bg))),
                    (green6(out), exact(green6(fg), green6(bg))),
                    (blue5(out), exact(blue5(fg), blue5(bg))),
                ];
                for (got, want) in checks {
                    assert!((f64::from(got) - want).abs() <= 1.0, "{got} vs {want}");
                }
            }
        }
    }

    #[test]
    fn test_black_white_midpoint() {
        // 31 * 128 / 255 = 15, 63 * 128 / 255 = 31
        assert_eq!(blend_rgb565(WHITE, BLACK, 128), pack(15, 31, 15));
        // 31 * 127 / 255 = 15, 63 * 127 / 255 = 31
        assert_eq!(blend_rgb565(BLACK, WHITE, 128), pack(15, 31, 15));
    }
}
