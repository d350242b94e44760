//! Math primitives for glint.
//!
//! Vector algebra comes from `glam`; this crate adds the ray, interval and
//! bounding-box types the renderer's intersection code is written against.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::{Aabb, Axis};
pub use interval::Interval;
pub use ray::Ray;
