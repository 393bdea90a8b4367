use approx::AbsDiffEq;

use crate::linalg::Vector2;

use super::{TransformError, UNIT_TOLERANCE};

/// A 2D rotation represented as a unit complex number `re + im*i`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation2d {
    pub re: f64,
    pub im: f64,
}

impl Rotation2d {
    pub const IDENTITY: Rotation2d = Rotation2d { re: 1.0, im: 0.0 };

    /// Builds from components without checking unit length.
    pub fn new_unchecked(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Builds from components, normalising if close enough to unit length
    /// and failing otherwise.
    pub fn try_new(re: f64, im: f64) -> Result<Self, TransformError> {
        let norm = (re * re + im * im).sqrt();
        if norm < 1e-12 {
            return Err(TransformError::ZeroMagnitude);
        }
        if (norm - 1.0).abs() > UNIT_TOLERANCE {
            return Err(TransformError::NotUnit(norm));
        }
        Ok(Self { re: re / norm, im: im / norm })
    }

    pub fn from_angle(theta: f64) -> Self {
        Self { re: theta.cos(), im: theta.sin() }
    }

    /// `exp` of a Lie-algebra scalar angle is just [`Self::from_angle`].
    pub fn exp(theta: f64) -> Self {
        Self::from_angle(theta)
    }

    /// `ln(R) = atan2(im, re)`.
    pub fn ln(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn angle(self) -> f64 {
        self.ln()
    }

    pub fn compose(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    pub fn inverse(self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    pub fn apply(self, v: Vector2) -> Vector2 {
        Vector2::new(self.re * v.x - self.im * v.y, self.im * v.x + self.re * v.y)
    }

    /// Great-circle interpolation: `exp(t * ln(r1 / r0)) * r0`.
    pub fn interpolate(r0: Self, r1: Self, t: f64) -> Self {
        let delta = r0.inverse().compose(r1).ln();
        Self::exp(t * delta).compose(r0)
    }
}

impl AbsDiffEq for Rotation2d {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        crate::linalg::COMPARE_EPSILON
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.re - other.re).abs() <= epsilon && (self.im - other.im).abs() <= epsilon
    }
}
