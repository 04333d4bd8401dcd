//! Recorded display mutations in arena units.
//!
//! A simulation emits [`SceneCommand`]s per turn; the display replays them.
//! Positions are arena coordinates and are normalized against the display's
//! [`ArenaBounds`](crate::display::ArenaBounds) when applied. Graphics named
//! by a command are loaded from the display's catalog on first use.

use std::fmt;

use crate::coords::Coordinate;
use crate::display::ArenaDisplay;
use crate::graphic::ResourceLoadError;
use crate::scene::{SceneError, SpriteId};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Creates any missing layers up to `layer`.
    AddSprite {
        layer: usize,
        graphic: usize,
        id: SpriteId,
        position: Coordinate<f64>,
    },
    MoveSprite {
        layer: usize,
        id: SpriteId,
        position: Coordinate<f64>,
    },
    /// Absolute rotation in radians.
    RotateSprite {
        layer: usize,
        id: SpriteId,
        rotation: f64,
    },
    RemoveSprite {
        layer: usize,
        id: SpriteId,
    },
    ChangeGraphic {
        layer: usize,
        id: SpriteId,
        graphic: usize,
    },
    SetArenaBounds {
        width: f64,
        height: f64,
    },
}

#[derive(Debug)]
pub enum CommandError {
    Scene(SceneError),
    Load(ResourceLoadError),
    InvalidArenaBounds { width: f64, height: f64 },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Scene(e) => write!(f, "scene command rejected: {e}"),
            CommandError::Load(e) => write!(f, "graphic could not be loaded: {e}"),
            CommandError::InvalidArenaBounds { width, height } => {
                write!(f, "arena bounds must be positive, got {width}x{height}")
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Scene(e) => Some(e),
            CommandError::Load(e) => Some(e),
            CommandError::InvalidArenaBounds { .. } => None,
        }
    }
}

impl From<SceneError> for CommandError {
    fn from(e: SceneError) -> Self {
        CommandError::Scene(e)
    }
}

impl From<ResourceLoadError> for CommandError {
    fn from(e: ResourceLoadError) -> Self {
        CommandError::Load(e)
    }
}

impl ArenaDisplay {
    pub fn apply(&mut self, cmd: &SceneCommand) -> Result<(), CommandError> {
        match *cmd {
            SceneCommand::AddSprite { layer, graphic, id, position } => {
                self.scene.ensure_layers(layer);
                self.ensure_graphic(graphic)?;
                let position = self.to_normalized(position);
                self.add_sprite(layer, graphic, id, position)?;
            }
            SceneCommand::MoveSprite { layer, id, position } => {
                let position = self.to_normalized(position);
                self.move_sprite(layer, id, position)?;
            }
            SceneCommand::RotateSprite { layer, id, rotation } => {
                self.rotate_sprite(layer, id, rotation)?;
            }
            SceneCommand::RemoveSprite { layer, id } => {
                self.remove_sprite(layer, id)?;
            }
            SceneCommand::ChangeGraphic { layer, id, graphic } => {
                self.ensure_graphic(graphic)?;
                self.change_graphic(layer, id, graphic)?;
            }
            SceneCommand::SetArenaBounds { width, height } => {
                if !self.set_arena_bounds(width, height) {
                    return Err(CommandError::InvalidArenaBounds { width, height });
                }
            }
        }
        Ok(())
    }

    /// Applies commands in order, stopping at the first failure.
    ///
    /// Returns how many commands were applied.
    pub fn apply_all<'a>(
        &mut self,
        commands: impl IntoIterator<Item = &'a SceneCommand>,
    ) -> Result<usize, CommandError> {
        let mut applied = 0;
        for cmd in commands {
            self.apply(cmd)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Loads catalog entry `code` into registry slot `code` unless that slot
    /// is already populated.
    pub fn ensure_graphic(&mut self, code: usize) -> Result<(), CommandError> {
        if self.registry.contains(code) {
            return Ok(());
        }

        let info = self
            .catalog
            .get(code)
            .ok_or(SceneError::UnknownGraphic { index: code })?;

        let bounds = self.arena_bounds();
        let path = self.catalog.path_of(info);
        let (wf, hf) = (info.width / bounds.width, info.height / bounds.height);

        log::debug!("loading graphic {code} from '{}'", path.display());
        self.add_graphic(path, wf, hf, code)?;
        Ok(())
    }

    /// Loads every catalog entry not yet in the registry.
    pub fn load_catalog(&mut self) -> Result<usize, CommandError> {
        let mut loaded = 0;
        for code in 0..self.catalog.len() {
            if !self.registry.contains(code) {
                self.ensure_graphic(code)?;
                loaded += 1;
            }
        }
        log::info!("loaded {loaded} catalog graphics");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GraphicCatalog, GraphicInfo};
    use crate::coords::{PixelSize, Rect};
    use crate::graphic::Bitmap;
    use crate::scene::DrawList;

    fn display() -> ArenaDisplay {
        let mut display = ArenaDisplay::new(PixelSize::new(800, 600));
        let bitmap = Bitmap::solid(10, 10, [255; 4]).unwrap();
        display.add_graphic_bitmap(bitmap, 0.1, 0.1, 0).unwrap();
        display
    }

    fn write_png(dir: &std::path::Path, name: &str) {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        img.save(dir.join(name)).unwrap();
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn add_sprite_creates_layers_and_normalizes() {
        let mut display = display();
        let cmds = [
            SceneCommand::SetArenaBounds { width: 200.0, height: 100.0 },
            SceneCommand::AddSprite {
                layer: 2,
                graphic: 0,
                id: 5,
                position: Coordinate::new(100.0, 25.0),
            },
        ];

        assert_eq!(display.apply_all(&cmds).unwrap(), 2);
        assert_eq!(display.scene().len(), 3);

        let placement = display.scene().layer(2).unwrap().get(5).unwrap();
        assert_eq!(placement.position, Coordinate::new(0.5, 0.25));
    }

    #[test]
    fn sequence_of_turns_updates_sprite() {
        let mut display = display();
        display.set_arena_bounds(10.0, 10.0);
        let cmds = [
            SceneCommand::AddSprite { layer: 0, graphic: 0, id: 1, position: Coordinate::new(1.0, 1.0) },
            SceneCommand::MoveSprite { layer: 0, id: 1, position: Coordinate::new(5.0, 5.0) },
            SceneCommand::RotateSprite { layer: 0, id: 1, rotation: 0.5 },
        ];
        display.apply_all(&cmds).unwrap();

        let mut list = DrawList::default();
        display.record(&mut list);
        let cmd = list.sprites().next().unwrap();
        assert!(cmd.footprint.approx_eq(Rect::new(360.0, 270.0, 80.0, 60.0), 1e-3));

        display.apply(&SceneCommand::RemoveSprite { layer: 0, id: 1 }).unwrap();
        display.record(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn apply_all_stops_at_first_error() {
        let mut display = display();
        let cmds = [
            SceneCommand::AddSprite { layer: 0, graphic: 0, id: 1, position: Coordinate::new(0.5, 0.5) },
            SceneCommand::MoveSprite { layer: 0, id: 99, position: Coordinate::new(0.1, 0.1) },
            SceneCommand::RemoveSprite { layer: 0, id: 1 },
        ];

        let err = display.apply_all(&cmds).unwrap_err();
        assert!(matches!(err, CommandError::Scene(SceneError::UnknownSprite { id: 99 })));
        // The remove after the failure never ran.
        assert!(display.scene().layer(0).unwrap().get(1).is_some());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let mut display = display();
        let err = display
            .apply(&SceneCommand::SetArenaBounds { width: -1.0, height: 4.0 })
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidArenaBounds { .. }));
        assert_eq!(display.arena_bounds().width, 1.0);
    }

    // ── catalog ───────────────────────────────────────────────────────────

    #[test]
    fn unknown_graphic_without_catalog_entry() {
        let mut display = display();
        let err = display
            .apply(&SceneCommand::AddSprite {
                layer: 0,
                graphic: 3,
                id: 1,
                position: Coordinate::new(0.0, 0.0),
            })
            .unwrap_err();
        assert!(matches!(err, CommandError::Scene(SceneError::UnknownGraphic { index: 3 })));
    }

    #[test]
    fn graphics_load_lazily_from_catalog() {
        let dir = std::env::temp_dir().join(format!("arena-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        write_png(&dir, "token.png");

        let mut catalog = GraphicCatalog::new(&dir);
        catalog.add_entry(GraphicInfo::new("token.png", 20.0, 10.0));

        let mut display = ArenaDisplay::new(PixelSize::new(800, 600));
        display.set_catalog(catalog);
        display.set_arena_bounds(100.0, 100.0);
        display
            .apply(&SceneCommand::AddSprite {
                layer: 0,
                graphic: 0,
                id: 1,
                position: Coordinate::new(50.0, 50.0),
            })
            .unwrap();

        let graphic = display.registry().get(0).unwrap();
        assert!((graphic.size().x - 160.0).abs() < 1e-3);
        assert!((graphic.size().y - 60.0).abs() < 1e-3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_catalog_file_is_a_load_error() {
        let mut catalog = GraphicCatalog::new("/nonexistent/arena");
        catalog.add_entry(GraphicInfo::new("ghost.png", 1.0, 1.0));

        let mut display = ArenaDisplay::new(PixelSize::new(800, 600));
        display.set_catalog(catalog);

        let err = display.load_catalog().unwrap_err();
        assert!(matches!(err, CommandError::Load(_)));
        assert!(display.registry().is_empty());
    }
}
