//! Spirograph demo: three sliders set the gear radii and pen distance, hold Space or
//! "Draw!" to trace, press R or "Clear All" to start over.

mod app;
mod gears;
mod palette;

use alo_engine::core::{Engine, EngineConfig};
use alo_engine::logging::{init_logging, LoggingConfig};
use anyhow::Result;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let engine = Engine::windowed(EngineConfig::new("Spirographs", 1920, 1080, 1, 1))?;
    log::info!("starting spirograph demo");
    engine.start(app::Spirograph::new())
}
