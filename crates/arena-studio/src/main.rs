//! Arena studio: a windowed demo of the sprite display.
//!
//! Usage: `arena-studio [IMAGE...]`. Each image becomes an extra sprite
//! graphic; without arguments only generated graphics are used.
//!
//! Keys: `+`/`-` zoom, arrows pan, `R` resets the view, `Esc` quits.

mod app;
mod graphics;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use arena_engine::device::GpuInit;
use arena_engine::logging::{init_logging, LoggingConfig};
use arena_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::StudioApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let images: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    log::info!("arena studio starting with {} image(s)", images.len());

    let config = RuntimeConfig {
        title: "Arena Studio".to_string(),
        initial_size: LogicalSize::new(1000.0, 600.0),
        continuous_redraw: true,
    };

    Runtime::run(config, GpuInit::default(), StudioApp::new(images))
}
