//! Line-graph compiler: collapses maximal chains of virtual series
//! resistors into a single composite `Line` component, using the
//! disjoint-set forest in [`crate::disjoint_set`] to detect chain
//! boundaries.

mod compiler;

pub use compiler::{Endpoint, Line, LineCompiler, LinePart, Pin, RealId, Terminal, VirtualId};

use thiserror::Error;

/// Precondition violations the line compiler refuses to work around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("connect referenced a component that was never added")]
    UnknownComponent,

    #[error("a component cannot be connected to itself")]
    SelfConnection,

    #[error("the compiler has already been built and accepts no further mutation")]
    AlreadyBuilt,

    #[error("an inner virtual resistor had unexpected degree or a real attachment")]
    InnerPrecondition,

    #[error("a connection between two real components does not involve the compiler")]
    RealRealConnection,
}
