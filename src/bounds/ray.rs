use crate::linalg::Vector3;

use super::{Aabb3, Obb, Plane};

/// A ray: an origin point and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn evaluate(self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Slab clipping against an AABB. NaN/∞ components in either the ray or
    /// the box fall out of every comparison and therefore yield `None`
    /// rather than a spurious hit.
    pub fn intersect_aabb(self, aabb: Aabb3) -> Option<(f64, f64)> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let (origin, dir, lo, hi) = match axis {
                0 => (self.origin.x, self.direction.x, aabb.min.x, aabb.max.x),
                1 => (self.origin.y, self.direction.y, aabb.min.y, aabb.max.y),
                _ => (self.origin.z, self.direction.z, aabb.min.z, aabb.max.z),
            };
            if dir.is_nan() || origin.is_nan() {
                return None;
            }
            if dir.abs() < 1e-12 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv_dir = 1.0 / dir;
            let mut t1 = (lo - origin) * inv_dir;
            let mut t2 = (hi - origin) * inv_dir;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if !(t_min <= t_max) {
                // Also catches NaN propagation from degenerate inputs.
                return None;
            }
        }

        if t_max < 0.0 || !t_min.is_finite() || !t_max.is_finite() {
            return None;
        }
        Some((t_min.max(0.0), t_max))
    }

    /// Transforms the ray into the box's local frame and reuses axis-aligned
    /// slab clipping.
    pub fn intersect_obb(self, obb: Obb) -> Option<(f64, f64)> {
        let inv = obb.rotation.inverse();
        let local_origin = inv.apply(self.origin - obb.center);
        let local_direction = inv.apply(self.direction);
        let local_ray = Ray { origin: local_origin, direction: local_direction };
        let local_box = Aabb3::new(-obb.half_size, obb.half_size);
        local_ray.intersect_aabb(local_box)
    }

    /// Solves `n · (o + t·d) + plane.d = 0` for `t`.
    pub fn intersect_plane(self, plane: Plane) -> Option<f64> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = -plane.signed_distance_to_point(self.origin) / denom;
        if t.is_finite() && t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// A bounded ray: an origin, unit direction, and non-negative length.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub ray: Ray,
    pub length: f64,
}

impl Line {
    pub fn new(ray: Ray, length: f64) -> Self {
        Self { ray, length: length.max(0.0) }
    }

    fn within_length(self, t: f64) -> bool {
        (0.0..=self.length).contains(&t)
    }

    pub fn intersect_aabb(self, aabb: Aabb3) -> Option<(f64, f64)> {
        self.ray.intersect_aabb(aabb).filter(|&(entry, _)| self.within_length(entry))
    }

    pub fn intersect_obb(self, obb: Obb) -> Option<(f64, f64)> {
        self.ray.intersect_obb(obb).filter(|&(entry, _)| self.within_length(entry))
    }

    pub fn intersect_plane(self, plane: Plane) -> Option<f64> {
        self.ray.intersect_plane(plane).filter(|&entry| self.within_length(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Rotation3d;

    #[test]
    fn ray_through_aabb_hits_expected_slab() {
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let aabb = Aabb3::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let (entry, exit) = ray.intersect_aabb(aabb).unwrap();
        assert!((entry - 4.0).abs() < 1e-9);
        assert!((exit - 6.0).abs() < 1e-9);
        assert!(entry <= exit);
        let hit = ray.evaluate(entry);
        assert!(aabb.contains_point(hit) || (hit.x - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn ray_missing_aabb_yields_none() {
        let ray = Ray::new(Vector3::new(-5.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let aabb = Aabb3::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(ray.intersect_aabb(aabb).is_none());
    }

    #[test]
    fn nan_direction_yields_no_intersection() {
        let ray = Ray { origin: Vector3::new(0.0, 0.0, 0.0), direction: Vector3::new(f64::NAN, 0.0, 0.0) };
        let aabb = Aabb3::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(ray.intersect_aabb(aabb).is_none());
    }

    #[test]
    fn nan_direction_on_an_out_of_bounds_axis_is_not_masked_by_other_axes() {
        // y is out of the box on an axis whose direction is NaN; the other
        // two axes' finite bounds must not paper over that.
        let ray = Ray { origin: Vector3::new(0.0, 5.0, 0.0), direction: Vector3::new(1.0, f64::NAN, 0.0) };
        let aabb = Aabb3::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(ray.intersect_aabb(aabb).is_none());
    }

    #[test]
    fn plane_intersection_matches_linear_solve() {
        let ray = Ray::new(Vector3::new(10.0, 10.0, 10.0), Vector3::new(0.0, -1.0, 0.0));
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), -1.0);
        let t = ray.intersect_plane(plane).unwrap();
        let hit = ray.evaluate(t);
        assert!((hit.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn line_segment_rejects_hits_past_its_length() {
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let aabb = Aabb3::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let short_line = Line::new(ray, 2.0);
        assert!(short_line.intersect_aabb(aabb).is_none());
        let long_line = Line::new(ray, 10.0);
        assert!(long_line.intersect_aabb(aabb).is_some());
    }

    #[test]
    fn obb_intersection_matches_aabb_when_unrotated() {
        let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let obb = Obb::new(Rotation3d::IDENTITY, Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0));
        assert!(ray.intersect_obb(obb).is_some());
    }
}
