use std::path::PathBuf;

use arena_engine::coords::PixelSize;
use arena_engine::core::{App, AppControl, FrameCtx};
use arena_engine::display::ArenaDisplay;
use arena_engine::paint::Color;
use arena_engine::render::SpriteRenderer;
use arena_engine::scene::DrawList;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::graphics;
use crate::scenario::{Scenario, ARENA_HEIGHT, ARENA_WIDTH};

const TOKEN_COUNT: usize = 9;
const ZOOM_STEP: f64 = 1.25;
const PAN_STEP: f64 = 0.05;

/// Engine-facing state of the demo.
///
/// The display is created once the surface exists, since graphic sizes are
/// resolved against the surface size.
pub struct StudioApp {
    images: Vec<PathBuf>,
    display: Option<ArenaDisplay>,
    scenario: Option<Scenario>,
    renderer: SpriteRenderer,
    draw_list: DrawList,
}

impl StudioApp {
    pub fn new(images: Vec<PathBuf>) -> Self {
        Self {
            images,
            display: None,
            scenario: None,
            renderer: SpriteRenderer::new(),
            draw_list: DrawList::default(),
        }
    }

    fn build(&self, size: PixelSize) -> anyhow::Result<(ArenaDisplay, Scenario)> {
        let mut display = ArenaDisplay::new(size);
        display.set_arena_bounds(ARENA_WIDTH, ARENA_HEIGHT);

        let extra = graphics::install(&mut display, &self.images)?;
        let scenario = Scenario::new(TOKEN_COUNT, &extra);
        display.apply_all(&scenario.setup_commands())?;

        log::info!(
            "arena ready: {} layers, {} sprites",
            display.scene().len(),
            display.scene().sprite_count()
        );
        Ok((display, scenario))
    }

    fn on_key(&mut self, key: &Key) -> AppControl {
        let Some(display) = self.display.as_mut() else {
            return AppControl::Continue;
        };

        match key {
            Key::Named(NamedKey::Escape) => return AppControl::Exit,
            Key::Named(NamedKey::ArrowLeft) => display.translate(PAN_STEP, 0.0),
            Key::Named(NamedKey::ArrowRight) => display.translate(-PAN_STEP, 0.0),
            Key::Named(NamedKey::ArrowUp) => display.translate(0.0, PAN_STEP),
            Key::Named(NamedKey::ArrowDown) => display.translate(0.0, -PAN_STEP),
            Key::Character(c) => match c.as_str() {
                "+" | "=" => display.zoom(ZOOM_STEP, ZOOM_STEP, 0.5, 0.5),
                "-" => display.zoom(1.0 / ZOOM_STEP, 1.0 / ZOOM_STEP, 0.5, 0.5),
                "r" | "R" => display.reset_view(),
                _ => {}
            },
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for StudioApp {
    fn on_surface_ready(&mut self, size: PixelSize) {
        match self.build(size) {
            Ok((display, scenario)) => {
                self.display = Some(display);
                self.scenario = Some(scenario);
            }
            Err(e) => log::error!("failed to build arena: {e:#}"),
        }
    }

    fn on_resize(&mut self, _old: PixelSize, new: PixelSize) {
        if let Some(display) = self.display.as_mut() {
            display.on_resize(new.width, new.height);
        }
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.on_key(&event.logical_key)
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(display) = self.display.as_mut() else {
            return AppControl::Exit;
        };

        if let Some(scenario) = self.scenario.as_mut() {
            let cmds = scenario.frame_commands(ctx.time.elapsed as f64);
            if let Err(e) = display.apply_all(&cmds) {
                log::error!("scenario command failed: {e}");
                return AppControl::Exit;
            }
        }

        display.record(&mut self.draw_list);

        let renderer = &mut self.renderer;
        let draw_list = &mut self.draw_list;
        ctx.render(Color::from_srgb_u8(18, 18, 22, 255), |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }
}
