//! Simulation-support core: forward-mode autodiff, fixed-size linear
//! algebra and rigid transforms built on it, volumetric bounding
//! primitives, a disjoint-set forest, a phantom-typed units/quantity
//! system, and a line-graph circuit compiler.
//!
//! Every fallible module exposes its own `thiserror` enum
//! (`DualError`, `LinalgError`, `TransformError`, `UnitsError`,
//! `GraphError`); [`error::SimError`] unifies them for call sites that
//! cross module boundaries.

pub mod bounds;
pub mod circuit;
pub mod disjoint_set;
pub mod dual;
pub mod error;
pub mod linalg;
pub mod transform;
pub mod units;

pub use error::SimError;

/// Re-exports of the types most call sites reach for, mirroring how the
/// pieces compose: duals feed vectors, vectors feed transforms and bounds.
pub mod prelude {
    pub use crate::bounds::{Aabb2, Aabb3, Containment, Line, Obb, Plane, Ray, Sphere};
    pub use crate::circuit::{Endpoint, GraphError, LineCompiler, Pin, RealId, Terminal};
    pub use crate::disjoint_set::DisjointSet;
    pub use crate::dual::{Dual, DualError};
    pub use crate::error::SimError;
    pub use crate::linalg::{
        DualMatrix3, DualVector2, DualVector3, DualVector4, LinalgError, Matrix3, Matrix4, Vector2, Vector2i, Vector3, Vector3i,
        Vector4, Vector4i,
    };
    pub use crate::transform::{Pose2d, Pose3d, Rotation2d, Rotation3d, Twist2, Twist3, TransformError};
    pub use crate::units::{
        Capacitance, Current, DimensionTag, Frequency, Inductance, Quantity, QuantityScale, Resistance, Scale,
        SourceQuantityScale, Time, UnitsError, Voltage,
    };
}
