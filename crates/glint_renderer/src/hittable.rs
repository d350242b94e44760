//! Intersection contract shared by every piece of scene geometry.

use crate::{Material, Ray};
use glint_math::{Aabb, Interval, Vec3};

/// Where and how a ray met a surface.
///
/// Only ever built for an actual hit, so every field is meaningful.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal facing against the incoming ray
    pub normal: Vec3,
    pub material: &'a dyn Material,
    pub u: f32,
    pub v: f32,
    pub t: f32,
    /// The ray arrived from outside the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Record a hit at parameter `t` on `ray`.
    ///
    /// `outward_normal` must be unit length; it is flipped when the ray
    /// comes from inside so that `normal` always opposes the ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        (u, v): (f32, f32),
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        Self {
            p: ray.at(t),
            normal: if front_face { outward_normal } else { -outward_normal },
            material,
            u,
            v,
            t,
            front_face,
        }
    }
}

/// Anything a ray can be tested against.
pub trait Hittable: Send + Sync {
    /// The closest intersection with `t` strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Box enclosing the object over the whole shutter interval.
    fn bounding_box(&self) -> Aabb;
}

/// Scene objects tested one after another; the BVH's brute-force twin.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(object: Box<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::enclosing(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_objects(self) -> Vec<Box<dyn Hittable>> {
        self.objects
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // Each hit shrinks the range the remaining objects must beat
        self.objects.iter().fold(None, |closest, object| {
            let max = closest.map_or(ray_t.max, |rec: HitRecord| rec.t);
            object.hit(ray, Interval::new(ray_t.min, max)).or(closest)
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
