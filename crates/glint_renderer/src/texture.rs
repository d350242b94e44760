//! Textures: color lookup by surface coordinates and hit point.

use std::sync::Arc;

use glint_core::ImageData;
use glint_math::{Interval, Vec3};

use crate::Color;

/// Maps `(u, v, p)` to a color.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// Solid 3-D checker pattern alternating between two textures.
///
/// Cells are cubes with edge `scale` in world space, so the pattern does
/// not depend on surface coordinates.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(scale, Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;

        if sum.rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Returned by [`ImageTexture`] when its image failed to load.
pub const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Texture backed by a decoded image, addressed by `(u, v)`.
pub struct ImageTexture {
    image: ImageData,
}

impl ImageTexture {
    pub fn new(image: ImageData) -> Self {
        Self { image }
    }

    /// Locate and load `name` through the image search path. A missing
    /// file leaves the texture empty, rendering as [`MISSING_IMAGE_COLOR`].
    pub fn open(name: &str) -> Self {
        Self::new(ImageData::open(name))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        if self.image.height() == 0 {
            return MISSING_IMAGE_COLOR;
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.image.width() as f32) as usize;
        let j = (v * self.image.height() as f32) as usize;
        let [r, g, b] = self.image.pixel_data(i, j);

        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}
