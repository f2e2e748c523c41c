mod display;

pub use display::PanelDisplay;
