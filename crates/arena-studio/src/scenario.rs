//! Demo arena: a tiled floor, a few walls and tokens circling the arena.
//!
//! Everything is expressed as scene commands in arena units, the same way a
//! simulation would drive the display turn by turn.

use std::f64::consts::TAU;

use arena_engine::command::SceneCommand;
use arena_engine::coords::Coordinate;
use arena_engine::scene::SpriteId;

use crate::graphics::{BLUE_TOKEN, FLOOR, RED_TOKEN, TILE, WALL};

pub const ARENA_WIDTH: f64 = 100.0;
pub const ARENA_HEIGHT: f64 = 60.0;

const FLOOR_LAYER: usize = 0;
const WALL_LAYER: usize = 1;
const TOKEN_LAYER: usize = 2;

/// Seconds between token color swaps.
const SWAP_PERIOD: f64 = 2.0;

#[derive(Debug, Clone)]
struct Token {
    id: SpriteId,
    graphic: usize,
    radius: f64,
    /// Radians per second; negative runs clockwise.
    speed: f64,
    phase: f64,
}

impl Token {
    fn angle(&self, t: f64) -> f64 {
        self.phase + self.speed * t
    }

    fn position(&self, t: f64) -> Coordinate<f64> {
        let a = self.angle(t);
        Coordinate::new(
            ARENA_WIDTH / 2.0 + self.radius * a.cos(),
            ARENA_HEIGHT / 2.0 + self.radius * a.sin(),
        )
    }

    /// Direction of travel.
    fn heading(&self, t: f64) -> f64 {
        self.angle(t) + self.speed.signum() * TAU / 4.0
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    tokens: Vec<Token>,
    swaps: u64,
}

impl Scenario {
    /// `extra_graphics` are additional token graphics (user images).
    pub fn new(token_count: usize, extra_graphics: &[usize]) -> Self {
        let palette: Vec<usize> = [RED_TOKEN, BLUE_TOKEN]
            .into_iter()
            .chain(extra_graphics.iter().copied())
            .collect();

        let tokens = (0..token_count)
            .map(|i| {
                let ring = (i % 3) as f64;
                Token {
                    id: i as SpriteId,
                    graphic: palette[i % palette.len()],
                    radius: 8.0 + ring * 7.0,
                    speed: (if i % 2 == 0 { 0.6 } else { -0.45 }) * (1.0 + ring * 0.2),
                    phase: TAU * i as f64 / token_count.max(1) as f64,
                }
            })
            .collect();

        Self { tokens, swaps: 0 }
    }

    /// Bounds, floor, walls and tokens at `t = 0`.
    pub fn setup_commands(&self) -> Vec<SceneCommand> {
        let mut cmds = vec![SceneCommand::SetArenaBounds {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }];

        let cols = (ARENA_WIDTH / TILE) as i32;
        let rows = (ARENA_HEIGHT / TILE) as i32;
        for row in 0..rows {
            for col in 0..cols {
                let border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
                let center = Coordinate::new(
                    (col as f64 + 0.5) * TILE,
                    (row as f64 + 0.5) * TILE,
                );
                cmds.push(SceneCommand::AddSprite {
                    layer: if border { WALL_LAYER } else { FLOOR_LAYER },
                    graphic: if border { WALL } else { FLOOR },
                    id: row * cols + col,
                    position: center,
                });
            }
        }

        for token in &self.tokens {
            cmds.push(SceneCommand::AddSprite {
                layer: TOKEN_LAYER,
                graphic: token.graphic,
                id: token.id,
                position: token.position(0.0),
            });
        }
        cmds
    }

    /// Token moves for time `t` seconds, plus a color swap every
    /// `SWAP_PERIOD` seconds.
    pub fn frame_commands(&mut self, t: f64) -> Vec<SceneCommand> {
        let mut cmds = Vec::with_capacity(self.tokens.len() * 2);
        for token in &self.tokens {
            cmds.push(SceneCommand::MoveSprite {
                layer: TOKEN_LAYER,
                id: token.id,
                position: token.position(t),
            });
            cmds.push(SceneCommand::RotateSprite {
                layer: TOKEN_LAYER,
                id: token.id,
                rotation: token.heading(t),
            });
        }

        let due = (t / SWAP_PERIOD).floor().max(0.0) as u64;
        if due > self.swaps && !self.tokens.is_empty() {
            self.swaps = due;
            let n = self.tokens.len();
            let token = &mut self.tokens[(due as usize) % n];
            token.graphic = if token.graphic == RED_TOKEN { BLUE_TOKEN } else { RED_TOKEN };
            cmds.push(SceneCommand::ChangeGraphic {
                layer: TOKEN_LAYER,
                id: token.id,
                graphic: token.graphic,
            });
        }
        cmds
    }
}
