//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce-depth cutoff
//! - Sky gradient illumination for rays that escape
//! - Anti-aliasing via multi-sampling
//! - Gamma-corrected PPM output

use std::io::{self, Write};

use crate::{Camera, Color, Hittable, Ray};
use glint_math::Interval;
use rand::RngCore;

/// Closest accepted hit distance; keeps scattered rays from re-hitting
/// their own origin surface through rounding error.
pub const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows one scattering path through the scene, multiplying by each
/// surface's attenuation, until the ray escapes to the sky, is absorbed,
/// or `depth` bounces have been spent.
pub fn ray_color(ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, depth - 1, world, rng),
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient by the ray's normalized y component.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize a linear color to display bytes: gamma-correct each channel,
/// clamp to `[0, 0.999]`, scale by 256 and truncate.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |linear: f32| (256.0 * intensity.clamp(linear_to_gamma(linear))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Write one pixel as a PPM text line.
pub fn write_color<W: Write + ?Sized>(out: &mut W, color: Color) -> io::Result<()> {
    let [r, g, b] = color_to_rgb8(color);
    writeln!(out, "{} {} {}", r, g, b)
}

fn write_ppm_header<W: Write + ?Sized>(out: &mut W, width: u32, height: u32) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", width, height)
}

/// Average `samples_per_pixel` path samples through pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, camera.max_depth(), world, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear image, row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&c| color_to_rgb8(c)).collect()
    }

    /// Convert for encoding through the `image` crate.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(color_to_rgb8(self.get(x, y))))
    }

    /// Write as plain-text PPM (`P3`).
    pub fn write_ppm<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_ppm_header(out, self.width, self.height)?;
        for &color in &self.pixels {
            write_color(out, color)?;
        }
        Ok(())
    }
}

/// Render the entire scene to an image buffer, in scanline order.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let (width, height) = (camera.image_width(), camera.image_height());
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );

    for y in 0..height {
        log::debug!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            image.set(x, y, render_pixel(camera, world, x, y, rng));
        }
    }

    log::info!("Done.");
    image
}

/// Render straight to a PPM stream, one pixel line at a time.
pub fn render_to_ppm<W: Write + ?Sized>(
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    out: &mut W,
) -> io::Result<()> {
    let (width, height) = (camera.image_width(), camera.image_height());
    write_ppm_header(out, width, height)?;

    for y in 0..height {
        log::debug!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            write_color(out, render_pixel(camera, world, x, y, rng))?;
        }
    }

    out.flush()
}
