use crate::linalg::{Vector2, Vector3};

/// An SE(2) Lie-algebra element: linear velocity plus a scalar angular rate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Twist2 {
    pub linear: Vector2,
    pub angular: f64,
}

impl Twist2 {
    pub fn new(linear: Vector2, angular: f64) -> Self {
        Self { linear, angular }
    }
}

/// An SE(3) Lie-algebra element: linear velocity plus an angular velocity
/// vector (axis scaled by rate).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Twist3 {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist3 {
    pub fn new(linear: Vector3, angular: Vector3) -> Self {
        Self { linear, angular }
    }
}
