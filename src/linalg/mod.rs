//! Fixed-size linear algebra: 2D/3D/4D vectors (real, integer-lattice, and
//! dual-valued) plus 3x3/4x4 matrices.

mod dual_matrix;
mod dual_vector;
mod matrix3;
mod matrix4;
mod vector;

pub use dual_matrix::DualMatrix3;
pub use dual_vector::{DualVector2, DualVector3, DualVector4};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use vector::{Vector2, Vector2i, Vector3, Vector3i, Vector4, Vector4i};

use thiserror::Error;

/// Errors raised by fixed-size linear algebra operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    #[error("matrix is singular (|det| < {epsilon}): cannot invert")]
    SingularMatrix { epsilon: f64 },

    #[error("dual linear algebra operands have mismatched dual order: {0} vs {1}")]
    SizeMismatch(usize, usize),
}

/// Default tolerance below which a determinant is treated as zero.
pub const SINGULAR_EPSILON: f64 = 1e-9;

/// Default tolerance for approximate geometric comparisons.
pub const COMPARE_EPSILON: f64 = 1e-6;
