//! Arena engine crate.
//!
//! A 2D sprite display: graphics sized as fractions of the render surface,
//! placed on ordered layers at normalized positions, and painted through a
//! wgpu renderer. Also owns the platform + GPU runtime used by hosts.

pub mod catalog;
pub mod command;
pub mod coords;
pub mod display;
pub mod graphic;
pub mod render;
pub mod scene;
pub mod view;

pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod time;
pub mod window;
