//! Axis-aligned bounding boxes
//!
//! Boxes are stored as a min/max corner pair in world space. Moving objects
//! build theirs from a center and a size every query; static objects build
//! theirs once from the vertices of their placed mesh.

use crate::foundation::math::Vec3;

/// An axis-aligned bounding box for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (per-axis lower bound)
    pub min: Vec3,
    /// Maximum corner (per-axis upper bound)
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its two corners
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box centered on `center` spanning `size` on each axis
    ///
    /// The half-extent is `size / 2`, so the result is
    /// `(center - size/2, center + size/2)`.
    pub fn from_extent(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates a cube-shaped box with the same size on every axis
    pub fn from_uniform_extent(center: Vec3, size: f32) -> Self {
        Self::from_extent(center, Vec3::repeat(size))
    }

    /// Creates the tightest box containing every point
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bounds = rest.iter().fold(Self::new(*first, *first), |acc, point| Self {
            min: acc.min.inf(point),
            max: acc.max.sup(point),
        });
        Some(bounds)
    }

    /// Check if this box overlaps another
    ///
    /// Touching faces count as overlapping. Stops at the first separating axis.
    pub fn overlaps(&self, other: &Self) -> bool {
        for axis in 0..3 {
            if self.max[axis] < other.min[axis] || self.min[axis] > other.max[axis] {
                return false;
            }
        }
        true
    }

    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size of the box on each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The same box moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_uniform_extent(center, 1.0)
    }

    #[test]
    fn test_from_extent_uses_half_size() {
        let bounds = Aabb::from_extent(Vec3::new(10.0, 0.0, -4.0), Vec3::new(5.0, 2.0, 8.0));
        assert_relative_eq!(bounds.min, Vec3::new(7.5, -1.0, -8.0));
        assert_relative_eq!(bounds.max, Vec3::new(12.5, 1.0, 0.0));
        assert_relative_eq!(bounds.center(), Vec3::new(10.0, 0.0, -4.0));
        assert_relative_eq!(bounds.size(), Vec3::new(5.0, 2.0, 8.0));
    }

    #[test]
    fn test_from_points_takes_per_axis_extremes() {
        let points = [
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-4.0, 5.0, 0.5),
            Vec3::new(2.0, 0.0, -6.0),
        ];
        let bounds = Aabb::from_points(&points).unwrap();
        assert_eq!(bounds.min, Vec3::new(-4.0, -2.0, -6.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn test_from_points_single_point_is_degenerate_box() {
        let point = Vec3::new(3.0, 4.0, 5.0);
        let bounds = Aabb::from_points(&[point]).unwrap();
        assert_eq!(bounds.min, point);
        assert_eq!(bounds.max, point);
    }

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let centers = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.1, 0.0, 0.0),
            Vec3::new(0.0, -0.9, 0.9),
            Vec3::new(5.0, 5.0, 5.0),
        ];

        for a in centers {
            for b in centers {
                let box_a = unit_box_at(a);
                let box_b = unit_box_at(b);
                assert_eq!(
                    box_a.overlaps(&box_b),
                    box_b.overlaps(&box_a),
                    "asymmetric overlap for {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_single_separating_axis_prevents_overlap() {
        for axis in 0..3 {
            let mut a_max = Vec3::repeat(10.0);
            let mut b_min = Vec3::repeat(-10.0);
            a_max[axis] = 0.0;
            b_min[axis] = 1.0;

            let a = Aabb::new(Vec3::repeat(-10.0), a_max);
            let b = Aabb::new(b_min, Vec3::repeat(10.0));

            assert!(!a.overlaps(&b), "axis {axis} should separate");
            assert!(!b.overlaps(&a), "axis {axis} should separate");
        }
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = Aabb::new(Vec3::zeros(), Vec3::repeat(1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::from_uniform_extent(Vec3::zeros(), 10.0);
        let inner = Aabb::from_uniform_extent(Vec3::new(1.0, 1.0, 1.0), 1.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_translated_moves_both_corners() {
        let bounds = unit_box_at(Vec3::zeros()).translated(Vec3::new(0.0, 5.0, -50.0));
        assert_relative_eq!(bounds.center(), Vec3::new(0.0, 5.0, -50.0));
        assert_relative_eq!(bounds.size(), Vec3::repeat(1.0));
    }
}
