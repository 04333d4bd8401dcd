use std::fmt;

use super::SpriteId;

/// A mutation referenced something that does not exist.
///
/// These are host bugs rather than runtime conditions; they are reported
/// instead of silently ignored so they surface in testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    UnknownLayer { index: usize, layer_count: usize },
    UnknownSprite { id: SpriteId },
    UnknownGraphic { index: usize },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownLayer { index, layer_count } => {
                write!(f, "layer {index} does not exist ({layer_count} layers)")
            }
            SceneError::UnknownSprite { id } => write!(f, "sprite {id} does not exist"),
            SceneError::UnknownGraphic { index } => {
                write!(f, "graphic {index} has not been added to the registry")
            }
        }
    }
}

impl std::error::Error for SceneError {}
