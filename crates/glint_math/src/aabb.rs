use crate::{Interval, Ray, Vec3};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The component of `v` along this axis.
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        v[self as usize]
    }
}

/// Axis-aligned bounding box, one [`Interval`] ("slab") per axis.
///
/// Boxes are never padded: a zero-thickness slab takes part in the slab
/// test like any other.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb::new(Interval::EMPTY, Interval::EMPTY, Interval::EMPTY);

    pub const UNIVERSE: Aabb = Aabb::new(Interval::UNIVERSE, Interval::UNIVERSE, Interval::UNIVERSE);

    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// The box spanned by two opposite corners, given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// The tightest box enclosing both `a` and `b`.
    pub fn enclosing(a: &Aabb, b: &Aabb) -> Self {
        Self::new(
            Interval::enclosing(&a.x, &b.x),
            Interval::enclosing(&a.y, &b.y),
            Interval::enclosing(&a.z, &b.z),
        )
    }

    #[inline]
    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Slab test: does the ray pass through the box for some `t` in `ray_t`?
    ///
    /// Each axis clips the running parameter range; the test bails out on the
    /// first axis that leaves it empty.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in Axis::ALL {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / axis.of(r.direction);
            let orig = axis.of(r.origin);

            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// The axis with the largest extent, ties going to the later axis.
    pub fn longest_axis(&self) -> Axis {
        let (x, y, z) = (self.x.size(), self.y.size(), self.z.size());
        if x > y && x > z {
            Axis::X
        } else if y > z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// True if `p` lies inside the box (closed on every face).
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.min <= inner.min && inner.max <= outer.max
        })
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_from_points_is_order_independent() {
        let a = Vec3::new(4.0, -2.0, 0.5);
        let b = Vec3::new(-1.0, 3.0, 0.25);
        let bbox = Aabb::from_points(a, b);

        assert_eq!(bbox, Aabb::from_points(b, a));
        assert_eq!(bbox.x, Interval::new(-1.0, 4.0));
        assert_eq!(bbox.y, Interval::new(-2.0, 3.0));
        assert_eq!(bbox.z, Interval::new(0.25, 0.5));
    }

    #[test]
    fn test_enclosing_contains_both() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::from_points(Vec3::new(2.0, -3.0, 0.5), Vec3::new(2.5, 0.0, 4.0));
        let both = Aabb::enclosing(&a, &b);

        assert!(both.contains_box(&a));
        assert!(both.contains_box(&b));
        assert_eq!(Aabb::enclosing(&Aabb::EMPTY, &a), a);
    }

    #[test]
    fn test_hit_and_miss() {
        let bbox = unit_box();
        let range = Interval::new(0.0, 100.0);

        let toward = Ray::at_time_zero(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(bbox.hit(&toward, range));

        let away = Ray::at_time_zero(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!bbox.hit(&away, range));

        let beside = Ray::at_time_zero(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);
        assert!(!bbox.hit(&beside, range));

        // The box is there, but beyond the queried range
        assert!(!bbox.hit(&toward, Interval::new(0.0, 3.5)));
    }

    #[test]
    fn test_ray_from_center_along_diagonal_hits() {
        let boxes = [
            unit_box(),
            Aabb::from_points(Vec3::new(2.0, 5.0, -7.0), Vec3::new(3.0, 9.0, -6.5)),
            Aabb::from_points(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.1, 0.1)),
        ];
        for bbox in boxes {
            let lo = Vec3::new(bbox.x.min, bbox.y.min, bbox.z.min);
            let hi = Vec3::new(bbox.x.max, bbox.y.max, bbox.z.max);
            let center = (lo + hi) * 0.5;
            let ray = Ray::at_time_zero(center, hi - lo);
            assert!(bbox.hit(&ray, Interval::new(0.0, f32::INFINITY)));
        }
    }

    #[test]
    fn test_flat_box_with_axis_parallel_rays() {
        // Zero thickness in z
        let flat = Aabb::from_points(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let range = Interval::new(0.0, 100.0);

        // Head-on, the z slab clips the range to a single point
        let through = Ray::at_time_zero(Vec3::new(0.5, 0.5, -3.0), Vec3::Z);
        assert!(!flat.hit(&through, range));

        let padded = Aabb::new(flat.x, flat.y, flat.z.expand(0.01));
        assert!(padded.hit(&through, range));

        // Parallel to the plane but off it
        let above = Ray::at_time_zero(Vec3::new(-5.0, 0.0, 0.5), Vec3::X);
        assert!(!padded.hit(&above, range));
    }

    #[test]
    fn test_longest_axis() {
        let wide = Aabb::from_points(Vec3::ZERO, Vec3::new(9.0, 1.0, 2.0));
        let tall = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 9.0, 2.0));
        let deep = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 2.0, 9.0));
        assert_eq!(wide.longest_axis(), Axis::X);
        assert_eq!(tall.longest_axis(), Axis::Y);
        assert_eq!(deep.longest_axis(), Axis::Z);
        assert_eq!(Axis::Y.of(Vec3::new(1.0, 2.0, 3.0)), 2.0);
    }
}
