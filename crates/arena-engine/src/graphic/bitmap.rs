use std::fmt;
use std::path::Path;

use image::DynamicImage;

use crate::coords::PixelSize;
use crate::paint::{linear_to_srgb, srgb_to_linear};

use super::error::{ResourceLoadError, ResourceLoadErrorKind};

/// Decoded image in the canonical pixel format: 8-bit sRGB-encoded RGBA with
/// alpha premultiplied in linear space.
///
/// Sampling the pixels through an sRGB texture yields linear premultiplied
/// color. Dimensions are always non-zero.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: PixelSize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Reads and decodes an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ResourceLoadError> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let bytes = std::fs::read(path)
            .map_err(|e| ResourceLoadError::new(&name, ResourceLoadErrorKind::Io(e)))?;
        let bitmap = Self::from_encoded(&name, &bytes)?;

        log::debug!("decoded '{name}' ({}x{})", bitmap.size.width, bitmap.size.height);
        Ok(bitmap)
    }

    /// Decodes an in-memory encoded image (PNG, JPEG, ...). `name` labels errors.
    pub fn from_encoded(name: &str, bytes: &[u8]) -> Result<Self, ResourceLoadError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ResourceLoadError::new(name, ResourceLoadErrorKind::Decode(e)))?;
        Self::from_image(name, &img)
    }

    /// Converts an already decoded image.
    pub fn from_image(name: &str, img: &DynamicImage) -> Result<Self, ResourceLoadError> {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Self::from_straight_rgba8(name, w, h, rgba.into_raw())
    }

    /// Wraps a straight-alpha RGBA8 buffer, premultiplying it in place.
    pub fn from_straight_rgba8(
        name: &str,
        width: u32,
        height: u32,
        mut pixels: Vec<u8>,
    ) -> Result<Self, ResourceLoadError> {
        if width == 0 || height == 0 {
            return Err(ResourceLoadError::new(name, ResourceLoadErrorKind::EmptyImage));
        }

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ResourceLoadError::new(
                name,
                ResourceLoadErrorKind::PixelBufferMismatch { expected, actual: pixels.len() },
            ));
        }

        premultiply(&mut pixels);
        Ok(Self { size: PixelSize::new(width, height), pixels })
    }

    /// A bitmap filled with one straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, ResourceLoadError> {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::from_straight_rgba8("solid", width, height, pixels)
    }

    /// A copy scaled down so neither side exceeds `max_dimension`, keeping
    /// the aspect ratio. `None` when the bitmap already fits.
    pub fn fit_within(&self, max_dimension: u32) -> Option<Bitmap> {
        let (width, height) = (self.size.width, self.size.height);
        if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
            return None;
        }

        let scale = max_dimension as f64 / width.max(height) as f64;
        let fit = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max_dimension);
        let (w, h) = (fit(width), fit(height));

        let src = image::RgbaImage::from_raw(width, height, self.pixels.clone())?;
        let scaled = image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle);
        Some(Self { size: PixelSize::new(w, h), pixels: scaled.into_raw() })
    }

    /// Native size in pixels.
    #[inline]
    pub fn pixel_size(&self) -> PixelSize {
        self.size
    }

    /// Premultiplied RGBA8 rows, tightly packed.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}

fn premultiply(pixels: &mut [u8]) {
    let linear: [f32; 256] = std::array::from_fn(|i| srgb_to_linear(i as f32 / 255.0));

    for px in pixels.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }

        let alpha = a as f32 / 255.0;
        for c in &mut px[..3] {
            let encoded = linear_to_srgb(linear[*c as usize] * alpha);
            *c = (encoded * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplies_in_linear_space() {
        let b = Bitmap::from_straight_rgba8("t", 1, 1, vec![255, 128, 0, 128]).unwrap();
        let px = b.pixels();
        // Half-covered white decodes to 0.5 linear, which is ~188 in sRGB.
        assert!(px[0].abs_diff(188) <= 1, "red {}", px[0]);
        assert!(px[1].abs_diff(93) <= 1, "green {}", px[1]);
        assert_eq!(&px[2..], &[0, 128]);

        let decoded = srgb_to_linear(px[0] as f32 / 255.0);
        assert!((decoded - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn transparent_pixels_become_zero() {
        let b = Bitmap::from_straight_rgba8("t", 1, 1, vec![200, 100, 50, 0]).unwrap();
        assert_eq!(b.pixels(), &[0, 0, 0, 0]);
    }

    #[test]
    fn opaque_pixels_are_untouched() {
        let b = Bitmap::solid(2, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(b.pixel_size(), PixelSize::new(2, 2));
        assert!(b.pixels().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Bitmap::from_straight_rgba8("t", 0, 4, Vec::new()).unwrap_err();
        assert!(matches!(err.kind, ResourceLoadErrorKind::EmptyImage));
    }

    #[test]
    fn buffer_length_must_match_dimensions() {
        let err = Bitmap::from_straight_rgba8("t", 2, 2, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err.kind,
            ResourceLoadErrorKind::PixelBufferMismatch { expected: 16, actual: 8 }
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = Bitmap::from_encoded("junk.png", b"definitely not an image").unwrap_err();
        assert!(matches!(err.kind, ResourceLoadErrorKind::Decode(_)));
        assert!(err.to_string().contains("junk.png"));
    }

    #[test]
    fn oversized_bitmap_is_fit_to_limit() {
        let b = Bitmap::solid(40, 10, [10, 20, 30, 255]).unwrap();
        assert!(b.fit_within(64).is_none());
        assert!(b.fit_within(40).is_none());

        let fitted = b.fit_within(8).unwrap();
        assert_eq!(fitted.pixel_size(), PixelSize::new(8, 2));
        assert_eq!(fitted.pixels().len(), 8 * 2 * 4);
        assert!(fitted.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn thin_bitmap_keeps_at_least_one_pixel() {
        let b = Bitmap::solid(1000, 1, [0, 0, 0, 255]).unwrap();
        let fitted = b.fit_within(100).unwrap();
        assert_eq!(fitted.pixel_size(), PixelSize::new(100, 1));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Bitmap::open("/nonexistent/arena/graphic.png").unwrap_err();
        assert!(matches!(err.kind, ResourceLoadErrorKind::Io(_)));
    }

    #[test]
    fn decodes_encoded_png() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 0, 255, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();

        let b = Bitmap::from_encoded("blue.png", bytes.get_ref()).unwrap();
        assert_eq!(b.pixel_size(), PixelSize::new(3, 2));
        assert_eq!(&b.pixels()[..4], &[0, 0, 255, 255]);
    }
}
