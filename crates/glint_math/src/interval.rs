/// A closed range `[min, max]` of ray parameters or coordinates.
///
/// An interval with `min > max` is empty. [`Interval::EMPTY`] is the
/// canonical empty value and is also the identity for [`Interval::enclosing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing: `min = +inf`, `max = -inf`.
    pub const EMPTY: Interval = Interval::new(f32::INFINITY, f32::NEG_INFINITY);

    /// Contains every finite value.
    pub const UNIVERSE: Interval = Interval::new(f32::NEG_INFINITY, f32::INFINITY);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The tightest interval enclosing both `a` and `b`.
    pub fn enclosing(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// `max - min`; negative for empty intervals.
    #[inline]
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Closed membership: `min <= x <= max`.
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Open membership: `min < x < max`.
    #[inline]
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Projects `x` into the interval.
    ///
    /// Unlike `f32::clamp` this never panics, which matters for the
    /// empty interval.
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    /// Grows the interval by `delta / 2` at each end.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta * 0.5;
        Interval::new(self.min - padding, self.max + padding)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
