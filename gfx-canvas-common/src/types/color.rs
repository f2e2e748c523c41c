//! RGB565 颜色工具
//!
//! 像素布局：`rrrrrggg gggbbbbb`

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const RED: u16 = 0xF800;
pub const GREEN: u16 = 0x07E0;
pub const BLUE: u16 = 0x001F;
pub const YELLOW: u16 = 0xFFE0;
pub const CYAN: u16 = 0x07FF;
pub const MAGENTA: u16 = 0xF81F;

/// 由 8 位分量构造 RGB565（截断低位）
#[inline]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// 由各通道原始位宽的分量拼装 RGB565
#[inline]
pub const fn pack(red: u8, green: u8, blue: u8) -> u16 {
    ((red as u16 & 0x1F) << 11) | ((green as u16 & 0x3F) << 5) | (blue as u16 & 0x1F)
}

#[inline]
pub const fn red5(color: u16) -> u8 {
    (color >> 11) as u8
}

#[inline]
pub const fn green6(color: u16) -> u8 {
    ((color >> 5) & 0x3F) as u8
}

#[inline]
pub const fn blue5(color: u16) -> u8 {
    (color & 0x1F) as u8
}
