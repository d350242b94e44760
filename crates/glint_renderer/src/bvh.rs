//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes over the scene's primitives. Each branch
//! owns its two children outright; leaves own exactly one primitive.

use std::cmp::Ordering;

use crate::{HitRecord, Hittable, HittableList, Ray};
use glint_math::{Aabb, Axis, Interval};

/// BVH node - a branch with two children, or a leaf with one primitive.
pub enum BvhNode {
    /// Internal node. `bbox` is the union of both children's boxes.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// A single primitive.
    Leaf {
        object: Box<dyn Hittable>,
        bbox: Aabb,
    },
    /// Built from an empty list; never hit.
    Empty,
}

impl BvhNode {
    /// Build a BVH over `objects`.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        let count = objects.len();
        let root = Self::build(objects);
        log::info!("Built BVH over {} primitives (depth {})", count, root.depth());
        root
    }

    /// Build a BVH over the contents of a list.
    pub fn from_list(list: HittableList) -> Self {
        Self::new(list.into_objects())
    }

    /// Recursive median split.
    ///
    /// Objects are sorted by their box minimum along the longest axis of the
    /// range's bounding box, then halved.
    fn build(mut objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.len() <= 1 {
            return match objects.pop() {
                Some(object) => BvhNode::leaf(object),
                None => BvhNode::Empty,
            };
        }

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::enclosing(&acc, &o.bounding_box()));
        let axis = bounds.longest_axis();

        objects.sort_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left = Self::build(objects);
        let right = Self::build(right_objects);

        let bbox = Aabb::enclosing(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    fn leaf(object: Box<dyn Hittable>) -> Self {
        let bbox = object.bounding_box();
        BvhNode::Leaf { object, bbox }
    }

    /// Number of primitives in the tree.
    pub fn len(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }

    /// Levels from this node down to the deepest leaf; a lone leaf is 1.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Order two primitives by the minimum of their boxes along `axis`.
fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: Axis) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.total_cmp(&b_min)
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { object, bbox } => {
                if bbox.hit(ray, ray_t) {
                    object.hit(ray, ray_t)
                } else {
                    None
                }
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let left_hit = left.hit(ray, ray_t);

                // A left hit bounds how far the right subtree needs searching
                let right_max = left_hit.map_or(ray_t.max, |rec| rec.t);
                right.hit(ray, Interval::new(ray_t.min, right_max)).or(left_hit)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
