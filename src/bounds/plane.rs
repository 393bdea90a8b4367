use crate::linalg::Vector3;

use super::{Aabb3, Obb};

/// A plane represented as a unit normal and a signed offset, satisfying
/// `n · p + d = 0` for any point `p` on the plane.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plane {
    pub normal: Vector3,
    pub d: f64,
}

impl Plane {
    pub fn new(normal: Vector3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Builds a normalised plane containing three non-colinear points,
    /// winding `a -> b -> c` to determine the normal's sign.
    pub fn create_from_vertices(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        let d = -normal.dot(a);
        Self { normal, d }
    }

    pub fn signed_distance_to_point(self, p: Vector3) -> f64 {
        self.normal.dot(p) + self.d
    }

    /// A plane intersects a box iff the box's half-extents, projected onto
    /// the absolute normal, reach as far as the centre's signed distance.
    pub fn evaluate_intersection(self, aabb: Aabb3) -> bool {
        let half = aabb.half_size();
        let center = aabb.center();
        let projected_radius = half.x * self.normal.x.abs() + half.y * self.normal.y.abs() + half.z * self.normal.z.abs();
        self.signed_distance_to_point(center).abs() <= projected_radius
    }

    /// Same test as [`Self::evaluate_intersection`] but for an oriented box,
    /// projecting the half-extents through the box's own rotated axes.
    pub fn intersects_obb(self, obb: Obb) -> bool {
        let axes = obb.axes();
        let projected_radius = obb.half_size.x * self.normal.dot(axes[0]).abs()
            + obb.half_size.y * self.normal.dot(axes[1]).abs()
            + obb.half_size.z * self.normal.dot(axes[2]).abs();
        self.signed_distance_to_point(obb.center()).abs() <= projected_radius
    }
}
