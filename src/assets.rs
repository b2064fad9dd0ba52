use crate::error::{Result, SimError};
use std::path::Path;

/// Decoded RGBA8 image, rows top to bottom.
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| SimError::ResourceLoad { path: path.to_path_buf(), source })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self { width, height, rgba: image.into_raw() })
    }

    /// On-screen size once drawn at `scale`.
    pub fn scaled_size(&self, scale: f32) -> (f32, f32) {
        (self.width as f32 * scale, self.height as f32 * scale)
    }

    /// `None` outside the image or past the end of `rgba`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize * self.width as usize) + x as usize) * 4;
        let px = self.rgba.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn missing_file_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Texture::load(dir.path().join("car.png")).err().unwrap();
        assert!(matches!(err, SimError::ResourceLoad { .. }));
    }

    #[test]
    fn loads_png_and_scales() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        let img = image::RgbaImage::from_pixel(30, 20, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let tex = Texture::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (30, 20));
        assert_eq!(tex.pixel(29, 19), Some([10, 20, 30, 255]));
        assert_eq!(tex.pixel(30, 0), None);
        let (w, h) = tex.scaled_size(0.1);
        assert_relative_eq!(w, 3.0);
        assert_relative_eq!(h, 2.0);
    }

    #[test]
    fn short_buffer_has_no_pixels() {
        let tex = Texture { width: 4, height: 4, rgba: vec![255; 8] };
        assert_eq!(tex.pixel(1, 0), Some([255; 4]));
        assert_eq!(tex.pixel(3, 3), None);
    }
}
