use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Request a redraw every loop iteration instead of only on
    /// resize/expose.
    pub continuous_redraw: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "arena".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            continuous_redraw: true,
        }
    }
}

/// Entry point for the runtime: one window, one GPU surface, one app.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.failure.map_or(Ok(()), Err)
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    /// Setup error reported by `Runtime::run` after the loop ends.
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<PixelSize> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let size = entry.borrow_gpu().size();
        self.entry = Some(entry);
        Ok(size)
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        // Drop the surface before the window goes away with the loop.
        self.entry = None;
        event_loop.exit();
    }

    fn resize(&mut self, new_size: PixelSize) {
        let Some(entry) = self.entry.as_mut() else { return };

        if let Some(old) = entry.with_gpu_mut(|gpu| gpu.resize(new_size)) {
            log::debug!("surface resized {old:?} -> {new_size:?}");
            self.app.on_resize(old, new_size);
        }
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self) -> AppControl {
        let app = &mut self.app;
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                time: fields.clock.tick(),
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(size) => {
                log::info!("window ready at {}x{}", size.width, size.height);
                self.app.on_surface_ready(size);
                if let Some(entry) = self.entry.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.failure = Some(e);
                self.exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.config.continuous_redraw {
            if let Some(entry) = self.entry.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),

            WindowEvent::Resized(new_size) => self.resize(PixelSize::from(new_size)),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self
                    .entry
                    .as_ref()
                    .map(|entry| entry.with_window(|w| PixelSize::from(w.inner_size())));
                if let Some(size) = size {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
