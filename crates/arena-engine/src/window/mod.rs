//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single display window, and wires them
//! to the GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
