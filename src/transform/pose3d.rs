use approx::AbsDiffEq;

use crate::linalg::Vector3;

use super::{Rotation3d, Twist3, SE3_SMALL_ANGLE_EPSILON};

/// An SE(3) rigid transform: a rotation followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose3d {
    pub rotation: Rotation3d,
    pub translation: Vector3,
}

impl Pose3d {
    pub const IDENTITY: Pose3d = Pose3d { rotation: Rotation3d::IDENTITY, translation: Vector3::ZERO };

    pub fn new(rotation: Rotation3d, translation: Vector3) -> Self {
        Self { rotation, translation }
    }

    /// SE(3) exponential via the closed form on the skew-symmetric generator
    /// of the angular part, Taylor-falling back below
    /// [`SE3_SMALL_ANGLE_EPSILON`].
    pub fn exp(twist: Twist3) -> Self {
        let w = twist.angular;
        let v = twist.linear;
        let theta = w.norm();
        let (c1, c2) = if theta < SE3_SMALL_ANGLE_EPSILON {
            (0.5 - theta * theta / 24.0, 1.0 / 6.0 - theta * theta / 120.0)
        } else {
            (
                (1.0 - theta.cos()) / (theta * theta),
                (theta - theta.sin()) / theta.powi(3),
            )
        };
        let translation = v + w.cross(v) * c1 + w.cross(w.cross(v)) * c2;
        Self { rotation: Rotation3d::exp(w), translation }
    }

    /// Inverse of [`Self::exp`].
    pub fn ln(self) -> Twist3 {
        let w = self.rotation.ln();
        let t = self.translation;
        let theta = w.norm();
        let c3 = if theta < SE3_SMALL_ANGLE_EPSILON {
            1.0 / 12.0 + theta * theta / 720.0
        } else {
            let denom = 2.0 * (1.0 - theta.cos());
            (1.0 - theta * theta.sin() / denom) / (theta * theta)
        };
        let linear = t - w.cross(t) * 0.5 + w.cross(w.cross(t)) * c3;
        Twist3::new(linear, w)
    }

    pub fn compose(self, other: Self) -> Self {
        Self {
            rotation: self.rotation.compose(other.rotation),
            translation: self.translation + self.rotation.apply(other.translation),
        }
    }

    pub fn inverse(self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: -inv_rotation.apply(self.translation),
        }
    }

    pub fn apply(self, v: Vector3) -> Vector3 {
        self.rotation.apply(v) + self.translation
    }
}

impl AbsDiffEq for Pose3d {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        crate::linalg::COMPARE_EPSILON
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(other.translation, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_log_round_trip() {
        let twist = Twist3::new(Vector3::new(1.0, -2.0, 0.5), Vector3::new(0.3, 0.1, -0.2));
        let pose = Pose3d::exp(twist);
        let back = pose.ln();
        assert!((back.linear - twist.linear).norm() < 1e-8);
        assert!((back.angular - twist.angular).norm() < 1e-8);
    }

    #[test]
    fn small_angle_exp_log_round_trip() {
        let twist = Twist3::new(Vector3::new(0.2, 0.1, -0.1), Vector3::new(1e-8, 0.0, 0.0));
        let pose = Pose3d::exp(twist);
        let back = pose.ln();
        assert!((back.linear - twist.linear).norm() < 1e-5);
    }

    #[test]
    fn compose_with_inverse_is_identity() {
        let pose = Pose3d::exp(Twist3::new(Vector3::new(1.0, 0.0, -1.0), Vector3::new(0.2, 0.4, 0.1)));
        let a = pose.compose(pose.inverse());
        let b = pose.inverse().compose(pose);
        assert!(a.abs_diff_eq(&Pose3d::IDENTITY, 1e-8));
        assert!(b.abs_diff_eq(&Pose3d::IDENTITY, 1e-8));
    }
}
