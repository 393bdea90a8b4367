use approx::AbsDiffEq;

use crate::linalg::Vector2;

use super::{Rotation2d, Twist2, SMALL_ANGLE_EPSILON};

/// An SE(2) rigid transform: a rotation followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose2d {
    pub rotation: Rotation2d,
    pub translation: Vector2,
}

impl Pose2d {
    pub const IDENTITY: Pose2d = Pose2d { rotation: Rotation2d::IDENTITY, translation: Vector2::ZERO };

    pub fn new(rotation: Rotation2d, translation: Vector2) -> Self {
        Self { rotation, translation }
    }

    /// Left-invariant SE(2) exponential: maps a body-frame twist to a pose,
    /// Taylor-falling back below [`SMALL_ANGLE_EPSILON`].
    pub fn exp(twist: Twist2) -> Self {
        let theta = twist.angular;
        let (a, b) = if theta.abs() < SMALL_ANGLE_EPSILON {
            (1.0 - theta * theta / 6.0, theta / 2.0 - theta.powi(3) / 24.0)
        } else {
            (theta.sin() / theta, (1.0 - theta.cos()) / theta)
        };
        let v = twist.linear;
        let translation = Vector2::new(a * v.x - b * v.y, b * v.x + a * v.y);
        Self { rotation: Rotation2d::exp(theta), translation }
    }

    /// Inverse of [`Self::exp`].
    pub fn ln(self) -> Twist2 {
        let theta = self.rotation.ln();
        let t = self.translation;
        let (inv_a, inv_b) = if theta.abs() < SMALL_ANGLE_EPSILON {
            (1.0, theta / 2.0)
        } else {
            let denom = 2.0 * (1.0 - theta.cos());
            let factor = theta * theta / denom;
            (factor * (theta.sin() / theta), factor * ((1.0 - theta.cos()) / theta))
        };
        let linear = Vector2::new(inv_a * t.x + inv_b * t.y, -inv_b * t.x + inv_a * t.y);
        Twist2::new(linear, theta)
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

    pub fn apply(self, v: Vector2) -> Vector2 {
        self.rotation.apply(v) + self.translation
    }
}

impl AbsDiffEq for Pose2d {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        crate::linalg::COMPARE_EPSILON
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(other.translation, epsilon)
    }
}
