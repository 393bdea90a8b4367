//! Rigid transforms built on top of [`crate::linalg`]: 2D/3D rotations,
//! SE(2)/SE(3) poses, and their Lie-algebra twists.

mod pose2d;
mod pose3d;
mod rotation2d;
mod rotation3d;
mod twist;

pub use pose2d::Pose2d;
pub use pose3d::Pose3d;
pub use rotation2d::Rotation2d;
pub use rotation3d::Rotation3d;
pub use twist::{Twist2, Twist3};

use thiserror::Error;

/// Errors raised constructing or composing rigid transforms.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("rotation input has magnitude {0} and is not close enough to unit length to normalise")]
    NotUnit(f64),

    #[error("quaternion/complex input has zero magnitude and carries no rotation")]
    ZeroMagnitude,
}

/// Below this rotation angle, `exp`/`ln` switch to a Taylor small-angle
/// branch rather than dividing by a near-zero `sin`/angle.
pub const SMALL_ANGLE_EPSILON: f64 = 1e-9;

/// Below this translation norm, SE(3) `exp`/`ln` use the quadratic Taylor
/// branch for the Jacobian-like coefficient rather than dividing by it.
pub const SE3_SMALL_ANGLE_EPSILON: f64 = 1e-7;

/// Tolerance used to decide whether a rotation input is "close enough" to
/// unit length to be accepted by a normalising constructor.
pub const UNIT_TOLERANCE: f64 = 1e-7;
