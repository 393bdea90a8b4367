use approx::AbsDiffEq;

use crate::linalg::{Matrix3, Vector3};

use super::{TransformError, SMALL_ANGLE_EPSILON, UNIT_TOLERANCE};

/// A 3D rotation represented as a unit quaternion `w + x*i + y*j + z*k`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation3d {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation3d {
    pub const IDENTITY: Rotation3d = Rotation3d { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new_unchecked(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn try_new(w: f64, x: f64, y: f64, z: f64) -> Result<Self, TransformError> {
        let norm = (w * w + x * x + y * y + z * z).sqrt();
        if norm < 1e-12 {
            return Err(TransformError::ZeroMagnitude);
        }
        if (norm - 1.0).abs() > UNIT_TOLERANCE {
            return Err(TransformError::NotUnit(norm));
        }
        Ok(Self { w: w / norm, x: x / norm, y: y / norm, z: z / norm })
    }

    fn vector_part(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Hamilton product: `self * other`.
    pub fn compose(self, other: Self) -> Self {
        Self {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    pub fn inverse(self) -> Self {
        Self { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Rotates `v` via the sandwich product `q * (0, v) * q⁻¹`, computed
    /// directly rather than through quaternion multiplication.
    pub fn apply(self, v: Vector3) -> Vector3 {
        let u = self.vector_part();
        let uv = u.cross(v);
        let uuv = u.cross(uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// `exp` of a Lie-algebra vector `w` (half-angle convention folded in):
    /// zero vector maps to identity, otherwise axis = `w/‖w‖`, half-angle =
    /// `‖w‖/2`.
    pub fn exp(w: Vector3) -> Self {
        let angle = w.norm();
        if angle < SMALL_ANGLE_EPSILON {
            // sin(θ/2)/θ -> 1/2 as θ -> 0.
            return Self::try_new(1.0, w.x * 0.5, w.y * 0.5, w.z * 0.5)
                .unwrap_or(Self::IDENTITY);
        }
        let half = angle / 2.0;
        let axis = w * (1.0 / angle);
        let s = half.sin();
        Self { w: half.cos(), x: axis.x * s, y: axis.y * s, z: axis.z * s }
    }

    /// Axis-angle extraction with a small-angle Taylor fallback below
    /// [`SMALL_ANGLE_EPSILON`].
    pub fn ln(self) -> Vector3 {
        let v = self.vector_part();
        let vnorm = v.norm();
        if vnorm < SMALL_ANGLE_EPSILON {
            // θ/sin(θ/2) -> 2 as θ -> 0; derivative-correct to first order.
            return v * 2.0;
        }
        let w = self.w.clamp(-1.0, 1.0);
        let angle = 2.0 * vnorm.atan2(w);
        v * (angle / vnorm)
    }

    /// `interpolate(a, b, t) = exp(t * ln(b / a)) * a`.
    pub fn interpolate(a: Self, b: Self, t: f64) -> Self {
        let delta = a.inverse().compose(b).ln();
        Self::exp(delta * t).compose(a)
    }

    /// Converts to a rotation matrix via the standard quaternion formula.
    pub fn to_matrix(self) -> Matrix3 {
        let Rotation3d { w, x, y, z } = self;
        Matrix3::from_row_major([
            1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - z * w), 2.0 * (x * z + y * w),
            2.0 * (x * y + z * w), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - x * w),
            2.0 * (x * z - y * w), 2.0 * (y * z + x * w), 1.0 - 2.0 * (x * x + y * y),
        ])
    }

    /// Converts from a (special-orthogonal) rotation matrix, branching on
    /// the largest of `{trace, m00, m11, m22}` to keep the square root
    /// argument away from zero.
    pub fn from_matrix(m: Matrix3) -> Self {
        let (m00, m01, m02) = (m.get(0, 0), m.get(0, 1), m.get(0, 2));
        let (m10, m11, m12) = (m.get(1, 0), m.get(1, 1), m.get(1, 2));
        let (m20, m21, m22) = (m.get(2, 0), m.get(2, 1), m.get(2, 2));
        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self {
                w: 0.25 * s,
                x: (m21 - m12) / s,
                y: (m02 - m20) / s,
                z: (m10 - m01) / s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self {
                w: (m21 - m12) / s,
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
            }
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self {
                w: (m02 - m20) / s,
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
            }
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self {
                w: (m10 - m01) / s,
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
            }
        }
    }
}

impl AbsDiffEq for Rotation3d {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        crate::linalg::COMPARE_EPSILON
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.w - other.w).abs() <= epsilon
            && (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_log_round_trip() {
        let w = Vector3::new(0.3, -0.1, 0.4);
        let q = Rotation3d::exp(w);
        let back = q.ln();
        assert!((back - w).norm() < 1e-9);
    }

    #[test]
    fn exp_zero_is_identity() {
        let q = Rotation3d::exp(Vector3::ZERO);
        assert!(q.abs_diff_eq(&Rotation3d::IDENTITY, 1e-9));
    }

    #[test]
    fn compose_with_inverse_is_identity() {
        let q = Rotation3d::exp(Vector3::new(0.2, 0.5, -0.3));
        let id = q.compose(q.inverse());
        assert!(id.abs_diff_eq(&Rotation3d::IDENTITY, 1e-9));
    }

    #[test]
    fn matrix_round_trip_preserves_rotation() {
        let q = Rotation3d::exp(Vector3::new(0.1, 0.2, 0.3));
        let m = q.to_matrix();
        assert!(m.is_special_orthogonal());
        let q2 = Rotation3d::from_matrix(m);
        // q and q2 may differ by sign (double cover); compare applied vectors.
        let v = Vector3::new(1.0, 2.0, 3.0);
        let a = q.apply(v);
        let b = q2.apply(v);
        assert!((a - b).norm() < 1e-6);
    }

    #[test]
    fn apply_matches_matrix_application() {
        let q = Rotation3d::exp(Vector3::new(0.4, -0.2, 0.1));
        let v = Vector3::new(1.0, 0.0, 0.0);
        let via_quat = q.apply(v);
        let via_matrix = q.to_matrix().apply(v);
        assert!((via_quat - via_matrix).norm() < 1e-9);
    }
}
