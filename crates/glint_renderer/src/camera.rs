//! Camera for ray generation.

use glint_core::CameraSettings;
use glint_math::Vec3;
use rand::RngCore;
use thiserror::Error;

use crate::sampling::{gen_f32, random_in_unit_disk, sample_square};
use crate::{render, Hittable, ImageBuffer, Ray};

/// Largest accepted image edge, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Camera settings that cannot produce a usable view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("image width must be at least one pixel")]
    ZeroWidth,

    #[error("samples per pixel must be at least one")]
    ZeroSamples,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("image of {width} pixels at aspect ratio {aspect_ratio} exceeds {max} pixels per side")]
    ImageTooLarge {
        width: u32,
        aspect_ratio: f32,
        max: u32,
    },

    #[error("vertical field of view must lie strictly between 0 and 180 degrees, got {0}")]
    InvalidFov(f32),

    #[error("focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f32),

    #[error("defocus angle must be non-negative and finite, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("look_from and look_at are the same point")]
    DegenerateView,

    #[error("up vector is parallel to the viewing direction")]
    DegenerateUp,
}

/// Camera for generating rays into the scene.
///
/// Built from [`CameraSettings`]; all derived viewport state is computed
/// once up front and never changes.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
    image_height: u32,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Validate `settings` and derive the viewport.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        validate(settings)?;

        let mut camera = Self {
            settings: settings.clone(),
            image_height: settings.image_height(),
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            samples_scale: 1.0,
        };
        camera.initialize();
        Ok(camera)
    }

    fn initialize(&mut self) {
        let s = &self.settings;
        let image_width = s.image_width as f32;
        let image_height = self.image_height as f32;

        self.samples_scale = 1.0 / s.samples_per_pixel as f32;
        self.center = s.look_from;

        // Viewport dimensions
        let h = (s.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * s.focus_dist;
        let viewport_width = viewport_height * (image_width / image_height);

        // Orthonormal camera basis
        self.w = (s.look_from - s.look_at).normalize();
        self.u = s.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the viewport's horizontal and down its vertical edge
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / image_width;
        self.pixel_delta_v = viewport_v / image_height;

        let viewport_upper_left =
            self.center - s.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = s.focus_dist * (s.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "Camera {}x{} at {:?} looking at {:?}",
            s.image_width,
            self.image_height,
            s.look_from,
            s.look_at
        );
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The sample point is jittered within the pixel, the origin is drawn
    /// from the defocus disk when the lens has an aperture, and the time is
    /// uniform in `[0, 1)`.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let lens = if self.has_defocus() {
            random_in_unit_disk(rng)
        } else {
            Vec3::ZERO
        };
        let time = gen_f32(rng);

        self.ray_for_sample(i, j, offset, lens, time)
    }

    /// Deterministic core of [`Camera::get_ray`]: `offset` is the jitter
    /// within the pixel (x, y in `[-0.5, 0.5)`), `lens` a point in the unit
    /// disk.
    pub fn ray_for_sample(&self, i: u32, j: u32, offset: Vec3, lens: Vec3, time: f32) -> Ray {
        let pixel_sample = self.pixel_sample_point(i, j, offset);

        let ray_origin = if self.has_defocus() {
            self.center + lens.x * self.defocus_disk_u + lens.y * self.defocus_disk_v
        } else {
            self.center
        };

        Ray::new(ray_origin, pixel_sample - ray_origin, time)
    }

    /// Point on the focus plane for pixel (i, j) shifted by `offset` pixels.
    pub fn pixel_sample_point(&self, i: u32, j: u32, offset: Vec3) -> Vec3 {
        self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v
    }

    /// Render `world` to an image buffer.
    pub fn render(&self, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
        render(self, world, rng)
    }

    fn has_defocus(&self) -> bool {
        self.settings.defocus_angle > 0.0
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn image_width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.settings.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.settings.max_depth
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

fn validate(s: &CameraSettings) -> Result<(), CameraError> {
    if s.image_width == 0 {
        return Err(CameraError::ZeroWidth);
    }
    if s.samples_per_pixel == 0 {
        return Err(CameraError::ZeroSamples);
    }
    if !(s.aspect_ratio.is_finite() && s.aspect_ratio > 0.0) {
        return Err(CameraError::InvalidAspectRatio(s.aspect_ratio));
    }
    // Checked in f64 before `image_height` truncates into a u32
    let height = f64::from(s.image_width) / f64::from(s.aspect_ratio);
    if s.image_width > MAX_IMAGE_DIMENSION || height >= f64::from(MAX_IMAGE_DIMENSION) + 1.0 {
        return Err(CameraError::ImageTooLarge {
            width: s.image_width,
            aspect_ratio: s.aspect_ratio,
            max: MAX_IMAGE_DIMENSION,
        });
    }
    if !(s.vfov > 0.0 && s.vfov < 180.0) {
        return Err(CameraError::InvalidFov(s.vfov));
    }
    if !(s.focus_dist.is_finite() && s.focus_dist > 0.0) {
        return Err(CameraError::InvalidFocusDistance(s.focus_dist));
    }
    if !(s.defocus_angle.is_finite() && s.defocus_angle >= 0.0) {
        return Err(CameraError::InvalidDefocusAngle(s.defocus_angle));
    }

    let view = s.look_from - s.look_at;
    if view.length_squared() <= f32::EPSILON * f32::EPSILON {
        return Err(CameraError::DegenerateView);
    }
    let up = s.vup.normalize_or_zero();
    if up.cross(view.normalize()).length_squared() <= f32::EPSILON {
        return Err(CameraError::DegenerateUp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    /// 2x2 image, 90 degree FOV, focus plane one unit away.
    fn unit_camera() -> Camera {
        let settings = CameraSettings::default()
            .with_image(2, 1.0)
            .with_lens(90.0, 0.0, 1.0);
        Camera::new(&settings).expect("valid settings")
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let settings = CameraSettings::default().with_position(
            Vec3::new(13.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::Y,
        );
        let camera = Camera::new(&settings).expect("valid settings");
        let (u, v, w) = camera.basis();

        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!(u.dot(v).abs() < 1e-5);
        assert!(u.dot(w).abs() < 1e-5);
        assert!(close(w, Vec3::new(13.0, 2.0, 3.0).normalize()));
    }

    #[test]
    fn test_image_height_derived() {
        let settings = CameraSettings::default().with_image(400, 16.0 / 9.0);
        let camera = Camera::new(&settings).expect("valid settings");
        assert_eq!(camera.image_width(), 400);
        assert_eq!(camera.image_height(), 225);
    }

    #[test]
    fn test_pixel_centers_on_focus_plane() {
        let camera = unit_camera();

        assert!(close(camera.pixel_sample_point(0, 0, Vec3::ZERO), Vec3::new(-0.5, 0.5, -1.0)));
        assert!(close(camera.pixel_sample_point(1, 0, Vec3::ZERO), Vec3::new(0.5, 0.5, -1.0)));
        assert!(close(camera.pixel_sample_point(1, 1, Vec3::ZERO), Vec3::new(0.5, -0.5, -1.0)));

        // Offsetting by half a pixel reaches the viewport corner
        let corner = camera.pixel_sample_point(0, 0, Vec3::new(-0.5, -0.5, 0.0));
        assert!(close(corner, Vec3::new(-1.0, 1.0, -1.0)));
    }

    #[test]
    fn test_pinhole_rays_start_at_center() {
        let camera = unit_camera();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let ray = camera.get_ray(1, 0, &mut rng);
            assert_eq!(ray.origin(), Vec3::ZERO);
            assert!((0.0..1.0).contains(&ray.time()));

            // Target stays inside pixel (1, 0) on the focus plane
            let target = ray.at(1.0);
            assert!(target.x >= 0.0 - 1e-5 && target.x <= 1.0 + 1e-5);
            assert!(target.y >= 0.0 - 1e-5 && target.y <= 1.0 + 1e-5);
            assert!((target.z + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_defocus_rays_start_on_disk_and_converge() {
        let settings = CameraSettings::default()
            .with_image(10, 1.0)
            .with_lens(40.0, 10.0, 5.0);
        let camera = Camera::new(&settings).expect("valid settings");
        let radius = 5.0 * (5.0f32).to_radians().tan();

        let mut rng = StdRng::seed_from_u64(9);
        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(3, 7, &mut rng);
            assert!(ray.origin().length() <= radius + 1e-5);
            assert_eq!(ray.origin().z, 0.0);
            moved |= ray.origin() != Vec3::ZERO;
        }
        assert!(moved);

        // Every lens sample through the same pixel offset meets on the focus plane
        let a = camera.ray_for_sample(3, 7, Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 0.0);
        let b = camera.ray_for_sample(3, 7, Vec3::ZERO, Vec3::new(-0.3, 0.6, 0.0), 0.0);
        assert!(close(a.at(1.0), b.at(1.0)));
    }

    #[test]
    fn test_rejects_bad_settings() {
        let base = CameraSettings::default();
        let cases = [
            (CameraSettings { image_width: 0, ..base.clone() }, CameraError::ZeroWidth),
            (CameraSettings { samples_per_pixel: 0, ..base.clone() }, CameraError::ZeroSamples),
            (CameraSettings { aspect_ratio: 0.0, ..base.clone() }, CameraError::InvalidAspectRatio(0.0)),
            (CameraSettings { vfov: 180.0, ..base.clone() }, CameraError::InvalidFov(180.0)),
            (CameraSettings { focus_dist: -1.0, ..base.clone() }, CameraError::InvalidFocusDistance(-1.0)),
            (CameraSettings { defocus_angle: -2.0, ..base.clone() }, CameraError::InvalidDefocusAngle(-2.0)),
            (CameraSettings { look_at: base.look_from, ..base.clone() }, CameraError::DegenerateView),
            (CameraSettings { vup: Vec3::new(0.0, 0.0, 3.0), ..base.clone() }, CameraError::DegenerateUp),
        ];

        for (settings, expected) in cases {
            assert_eq!(Camera::new(&settings).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_rejects_oversized_image() {
        let tall = CameraSettings::default().with_image(100, 1e-9);
        assert!(matches!(Camera::new(&tall), Err(CameraError::ImageTooLarge { width: 100, .. })));

        let wide = CameraSettings::default().with_image(MAX_IMAGE_DIMENSION + 1, 1.0e6);
        assert!(matches!(Camera::new(&wide), Err(CameraError::ImageTooLarge { .. })));

        let limit = CameraSettings::default().with_image(MAX_IMAGE_DIMENSION, 1.0).with_quality(1, 1);
        let camera = Camera::new(&limit).expect("largest square image is accepted");
        assert_eq!(camera.image_height(), MAX_IMAGE_DIMENSION);
    }

    #[test]
    fn test_short_up_vector_accepted() {
        let settings = CameraSettings {
            vup: Vec3::new(0.0, 1e-4, 0.0),
            ..CameraSettings::default()
        };
        let camera = Camera::new(&settings).expect("direction of vup is what matters");
        let (_, v, _) = camera.basis();
        assert!((v - Vec3::Y).length() < 1e-5);

        let zero = CameraSettings {
            vup: Vec3::ZERO,
            ..CameraSettings::default()
        };
        assert_eq!(Camera::new(&zero).unwrap_err(), CameraError::DegenerateUp);
    }

    #[test]
    fn test_zero_depth_is_allowed() {
        let settings = CameraSettings::default().with_quality(1, 0);
        assert!(Camera::new(&settings).is_ok());
    }
}
