use gfx_canvas_common::{BudgetAllocator, info};
use gfx_canvas_graphics::Canvas;

mod config;
mod drivers;
mod scene;

use config::SimulatorConfig;
use drivers::PanelDisplay;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading simulator config from {}", path);
            SimulatorConfig::load(&path)?
        }
        None => SimulatorConfig::default(),
    };

    let panel = PanelDisplay::new(config.panel_width, config.panel_height);
    let allocator = BudgetAllocator::new(config.memory_budget.unwrap_or(usize::MAX));
    let mut canvas = Canvas::with_allocator(config.canvas, panel, allocator)?;
    canvas.initialize()?;

    scene::render(&mut canvas)?;
    canvas.flush()?;

    let (x, y) = canvas.output_offset();
    info!(
        "Canvas {}x{} flushed at ({}, {})",
        canvas.width(),
        canvas.height(),
        x,
        y
    );

    let panel = canvas.release();
    for stats in panel.history() {
        info!(
            "Transfer {}x{} at ({}, {}): {} pixels on panel",
            stats.width, stats.height, stats.x, stats.y, stats.copied
        );
    }
    let center = panel.pixel(config.panel_width / 2, config.panel_height / 2);
    info!(
        "Panel checksum {:08x}, speed {:?}, center pixel {:04x?}",
        panel.checksum(),
        panel.speed(),
        center
    );

    Ok(())
}
