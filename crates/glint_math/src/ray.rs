use crate::Vec3;

/// A ray `P(t) = origin + t * direction` stamped with a shutter time.
///
/// The direction is not required to be unit length. `time` lies in `[0, 1)`
/// and selects where moving geometry sits when the ray is traced; rays
/// spawned from a hit carry their parent's time forward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// A ray at shutter time zero.
    #[inline]
    pub fn at_time_zero(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// The point reached after travelling parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::at_time_zero(Vec3::ZERO, Vec3::NEG_Z)
    }
}
