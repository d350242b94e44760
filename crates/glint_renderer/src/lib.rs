//! glint renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials, procedural and image textures, motion blur and depth of field.
//! Rendering is single-threaded and deterministic for a given seed.

mod bvh;
mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod texture;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraError, MAX_IMAGE_DIMENSION};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    near_zero, reflect, refract, Color, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, render_to_ppm, sky_color,
    write_color, ImageBuffer, T_MIN,
};
pub use scene::{build_world, BuildError, Scene};
pub use sphere::{sphere_uv, Sphere};
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture, MISSING_IMAGE_COLOR};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Axis, Interval, Ray, Vec3};
