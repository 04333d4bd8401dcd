use winit::event::WindowEvent;

use crate::coords::PixelSize;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Call order: `on_surface_ready` once, then any number of `on_resize` and
/// `on_frame`. A resize is always delivered before the next frame.
pub trait App {
    /// The window and GPU surface exist; `size` is the initial drawable size.
    fn on_surface_ready(&mut self, size: PixelSize) {
        let _ = size;
    }

    /// The surface was reconfigured from `old` to `new`. `new` may be zero
    /// while the window is minimized.
    fn on_resize(&mut self, old: PixelSize, new: PixelSize) {
        let _ = (old, new);
    }

    /// Raw window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
