use crate::linalg::Vector3;
use crate::transform::Rotation3d;

use super::Sphere;

/// An oriented bounding box: a rotation, centre, and three half-extents
/// along the rotated axes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obb {
    pub rotation: Rotation3d,
    pub center: Vector3,
    pub half_size: Vector3,
}

impl Obb {
    pub fn new(rotation: Rotation3d, center: Vector3, half_size: Vector3) -> Self {
        Self { rotation, center, half_size }
    }

    pub fn center(self) -> Vector3 {
        self.center
    }

    /// The box's three local axes (rotated world basis vectors).
    pub fn axes(self) -> [Vector3; 3] {
        [
            self.rotation.apply(Vector3::new(1.0, 0.0, 0.0)),
            self.rotation.apply(Vector3::new(0.0, 1.0, 0.0)),
            self.rotation.apply(Vector3::new(0.0, 0.0, 1.0)),
        ]
    }

    /// Enumerates the eight corners of the box in world space.
    pub fn for_each_corner(self) -> [Vector3; 8] {
        let axes = self.axes();
        let mut corners = [Vector3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = self.center
                + axes[0] * (sx * self.half_size.x)
                + axes[1] * (sy * self.half_size.y)
                + axes[2] * (sz * self.half_size.z);
        }
        corners
    }

    /// Projects `p` into this box's local (unrotated, centred) frame.
    fn to_local(self, p: Vector3) -> Vector3 {
        let axes = self.axes();
        let rel = p - self.center;
        Vector3::new(rel.dot(axes[0]), rel.dot(axes[1]), rel.dot(axes[2]))
    }

    /// Contains a sphere iff the squared distance from the sphere's centre
    /// (in the box's local frame) to the closed box is within `radius²`.
    pub fn contains_sphere(self, sphere: Sphere) -> bool {
        let local = self.to_local(sphere.center);
        let clamped = Vector3::new(
            local.x.clamp(-self.half_size.x, self.half_size.x),
            local.y.clamp(-self.half_size.y, self.half_size.y),
            local.z.clamp(-self.half_size.z, self.half_size.z),
        );
        (local - clamped).norm_squared() <= sphere.radius * sphere.radius
    }

    /// Full 15-axis separating axis test: the three axes of each box and the
    /// nine pairwise cross products.
    pub fn intersects(self, other: Self) -> bool {
        let a = self.axes();
        let b = other.axes();
        let t = other.center - self.center;

        let mut test_axes = Vec::with_capacity(15);
        test_axes.extend_from_slice(&a);
        test_axes.extend_from_slice(&b);
        for ai in &a {
            for bi in &b {
                test_axes.push(ai.cross(*bi));
            }
        }

        for axis in test_axes {
            let len = axis.norm();
            if len < 1e-9 {
                continue;
            }
            let axis = axis * (1.0 / len);
            let project = |box_axes: &[Vector3; 3], half: Vector3| {
                (box_axes[0] * half.x).dot(axis).abs()
                    + (box_axes[1] * half.y).dot(axis).abs()
                    + (box_axes[2] * half.z).dot(axis).abs()
            };
            let ra = project(&a, self.half_size);
            let rb = project(&b, other.half_size);
            if t.dot(axis).abs() > ra + rb {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_overlapping_boxes_intersect() {
        let a = Obb::new(Rotation3d::IDENTITY, Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0));
        let b = Obb::new(Rotation3d::IDENTITY, Vector3::new(1.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(a.intersects(b));
    }

    #[test]
    fn axis_aligned_separated_boxes_do_not_intersect() {
        let a = Obb::new(Rotation3d::IDENTITY, Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0));
        let b = Obb::new(Rotation3d::IDENTITY, Vector3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(b));
    }

    #[test]
    fn for_each_corner_produces_eight_distinct_points_around_center() {
        let obb = Obb::new(Rotation3d::IDENTITY, Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0));
        let corners = obb.for_each_corner();
        assert_eq!(corners.len(), 8);
        for c in corners {
            assert!(c.x.abs() <= 1.0 + 1e-9 && c.y.abs() <= 2.0 + 1e-9 && c.z.abs() <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn contains_sphere_inside_box() {
        let obb = Obb::new(Rotation3d::IDENTITY, Vector3::ZERO, Vector3::new(5.0, 5.0, 5.0));
        let sphere = Sphere::new(Vector3::new(1.0, 1.0, 1.0), 0.5);
        assert!(obb.contains_sphere(sphere));
        let far_sphere = Sphere::new(Vector3::new(10.0, 10.0, 10.0), 0.5);
        assert!(!obb.contains_sphere(far_sphere));
    }
}
