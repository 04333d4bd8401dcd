//! Generated sprite graphics plus optional user images.

use std::path::PathBuf;

use anyhow::{Context, Result};
use arena_engine::display::ArenaDisplay;
use arena_engine::graphic::Bitmap;

pub const FLOOR: usize = 0;
pub const WALL: usize = 1;
pub const RED_TOKEN: usize = 2;
pub const BLUE_TOKEN: usize = 3;
/// First registry slot used for images given on the command line.
pub const FIRST_USER: usize = 4;

/// Arena units.
pub const TILE: f64 = 10.0;
pub const TOKEN: f64 = 6.0;

/// Square tile with a darker one-pixel border.
pub fn tile(size: u32, fill: [u8; 4], border: [u8; 4]) -> Result<Bitmap> {
    let pixels = raster(size, |x, y| {
        let edge = x == 0 || y == 0 || x == size - 1 || y == size - 1;
        if edge { border } else { fill }
    });
    Bitmap::from_straight_rgba8("tile", size, size, pixels).context("tile bitmap")
}

/// Round token with a light stripe from the center to the right edge, so
/// its rotation is visible.
pub fn token(size: u32, fill: [u8; 4]) -> Result<Bitmap> {
    let r = size as f32 / 2.0;
    let stripe = [255, 255, 255, 255];

    let pixels = raster(size, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy > r * r {
            [0; 4]
        } else if dx > 0.0 && dy.abs() < r * 0.15 {
            stripe
        } else {
            fill
        }
    });
    Bitmap::from_straight_rgba8("token", size, size, pixels).context("token bitmap")
}

fn raster(size: u32, mut pixel: impl FnMut(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            out.extend_from_slice(&pixel(x, y));
        }
    }
    out
}

/// Registers the generated graphics and every loadable user image.
///
/// Returns the registry codes of the user images that loaded. An image that
/// fails to decode is logged and skipped.
pub fn install(display: &mut ArenaDisplay, images: &[PathBuf]) -> Result<Vec<usize>> {
    let bounds = display.arena_bounds();
    let frac = |w: f64, h: f64| (w / bounds.width, h / bounds.height);

    let (tw, th) = frac(TILE, TILE);
    display.add_graphic_bitmap(tile(32, [40, 44, 52, 255], [28, 30, 36, 255])?, tw, th, FLOOR)?;
    display.add_graphic_bitmap(tile(32, [120, 110, 96, 255], [70, 64, 56, 255])?, tw, th, WALL)?;

    let (kw, kh) = frac(TOKEN, TOKEN);
    display.add_graphic_bitmap(token(64, [210, 60, 50, 255])?, kw, kh, RED_TOKEN)?;
    display.add_graphic_bitmap(token(64, [50, 110, 220, 255])?, kw, kh, BLUE_TOKEN)?;

    let mut loaded = Vec::new();
    for (i, path) in images.iter().enumerate() {
        let code = FIRST_USER + i;
        match display.add_graphic(path, kw * 1.5, kh * 1.5, code) {
            Ok(()) => loaded.push(code),
            Err(e) => log::warn!("skipping image: {e}"),
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::coords::PixelSize;

    #[test]
    fn token_corners_are_transparent() {
        let bitmap = token(16, [255, 0, 0, 255]).unwrap();
        assert_eq!(&bitmap.pixels()[..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn install_fills_fixed_slots_and_skips_bad_images() {
        let mut display = ArenaDisplay::new(PixelSize::new(1000, 600));
        display.set_arena_bounds(100.0, 60.0);

        let loaded = install(&mut display, &[PathBuf::from("/nonexistent/a.png")]).unwrap();
        assert!(loaded.is_empty());
        for code in [FLOOR, WALL, RED_TOKEN, BLUE_TOKEN] {
            assert!(display.registry().contains(code));
        }

        let floor = display.registry().get(FLOOR).unwrap();
        assert!((floor.size().x - 100.0).abs() < 1e-3);
        assert!((floor.size().y - 100.0).abs() < 1e-3);
    }
}
