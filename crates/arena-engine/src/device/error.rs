/// What the host should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (commonly OOM); shut down.
    Fatal,
}

impl SurfaceErrorAction {
    /// Maps a wgpu error without touching the surface.
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError::*;
        assert_eq!(SurfaceErrorAction::classify(&Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(SurfaceErrorAction::classify(&Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(SurfaceErrorAction::classify(&OutOfMemory), SurfaceErrorAction::Fatal);
        assert_eq!(SurfaceErrorAction::classify(&Timeout), SurfaceErrorAction::SkipFrame);
    }
}
