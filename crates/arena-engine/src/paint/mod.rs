//! Color representation shared by the runtime and renderers.

mod color;

pub use color::Color;
pub(crate) use color::{linear_to_srgb, srgb_to_linear};
