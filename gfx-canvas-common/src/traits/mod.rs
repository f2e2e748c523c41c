pub mod allocator;
pub mod display;

pub use allocator::*;
pub use display::*;
