//! 渲染模块
//! 内存画布、裁剪、位图绘制与 alpha 混合

mod blend;
mod blit;
mod clip;
#[cfg(feature = "graphics")]
mod draw_target;
mod framebuffer;
mod primitives;

pub use blend::blend_rgb565;
pub use framebuffer::Canvas;
pub use primitives::GfxPrimitives;
