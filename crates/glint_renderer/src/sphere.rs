//! Sphere primitive, optionally moving during the shutter interval.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};

/// A sphere whose center moves linearly from `center0` at time 0 to
/// `center0 + motion` at time 1. Stationary spheres have zero motion.
pub struct Sphere {
    center0: Vec3,
    motion: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// A stationary sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// A sphere at `center0` when `time = 0` and `center1` when `time = 1`.
    pub fn moving(center0: Vec3, center1: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let start = Aabb::from_points(center0 - rvec, center0 + rvec);
        let end = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center0,
            motion: center1 - center0,
            radius,
            material,
            bbox: Aabb::enclosing(&start, &end),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_moving(&self) -> bool {
        self.motion != Vec3::ZERO
    }

    /// Center at shutter time `time`.
    #[inline]
    pub fn center_at(&self, time: f32) -> Vec3 {
        self.center0 + time * self.motion
    }
}

/// Surface coordinates of a point `p` on the unit sphere.
///
/// `u` runs around the y axis starting from -x, `v` from -y to +y:
/// `(1,0,0) -> (0.5, 0.5)`, `(0,1,0) -> (0.5, 1.0)`, `(0,0,1) -> (0.25, 0.5)`.
pub fn sphere_uv(p: Vec3) -> (f32, f32) {
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + PI;
    (phi / (2.0 * PI), theta / PI)
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let center = self.center_at(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in range, falling back to the far one
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
