use std::fmt;

/// Why a graphic could not be turned into a drawable resource.
#[derive(Debug)]
pub enum ResourceLoadErrorKind {
    /// The image source could not be read.
    Io(std::io::Error),
    /// The bytes were read but are not a decodable image.
    Decode(image::ImageError),
    /// The decoded image has no pixels.
    EmptyImage,
    /// A raw pixel buffer does not match its declared dimensions.
    PixelBufferMismatch { expected: usize, actual: usize },
    /// Size fractions must be finite and strictly positive.
    InvalidFraction { width: f64, height: f64 },
}

/// A graphic failed to decode or to become a brush.
///
/// No resource value exists after this error, so nothing half-initialized can
/// end up in a registry.
#[derive(Debug)]
pub struct ResourceLoadError {
    /// Path or label of the image source.
    pub source_name: String,
    pub kind: ResourceLoadErrorKind,
}

impl ResourceLoadError {
    pub(crate) fn new(source_name: impl Into<String>, kind: ResourceLoadErrorKind) -> Self {
        Self { source_name: source_name.into(), kind }
    }
}

impl fmt::Display for ResourceLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.source_name;
        match &self.kind {
            ResourceLoadErrorKind::Io(e) => write!(f, "failed to read graphic '{name}': {e}"),
            ResourceLoadErrorKind::Decode(e) => write!(f, "failed to decode graphic '{name}': {e}"),
            ResourceLoadErrorKind::EmptyImage => write!(f, "graphic '{name}' has zero size"),
            ResourceLoadErrorKind::PixelBufferMismatch { expected, actual } => write!(
                f,
                "graphic '{name}' pixel buffer holds {actual} bytes, expected {expected}"
            ),
            ResourceLoadErrorKind::InvalidFraction { width, height } => write!(
                f,
                "graphic '{name}' has invalid size fractions ({width}, {height})"
            ),
        }
    }
}

impl std::error::Error for ResourceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ResourceLoadErrorKind::Io(e) => Some(e),
            ResourceLoadErrorKind::Decode(e) => Some(e),
            _ => None,
        }
    }
}
