//! Crate-wide error umbrella.
//!
//! Every module that can fail defines its own narrow error enum (`DualError`,
//! `LinalgError`, `TransformError`, `UnitsError`, `GraphError`) instead of one
//! God enum. `SimError` exists only for call sites that legitimately cross
//! module boundaries (the line compiler consults both disjoint-set and graph
//! invariants; classification can fail on both a units error and a registry
//! lookup).

use thiserror::Error;

use crate::circuit::GraphError;
use crate::dual::DualError;
use crate::linalg::LinalgError;
use crate::transform::TransformError;
use crate::units::UnitsError;

/// Unifying error type for call sites that cross module boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Dual(#[from] DualError),

    #[error(transparent)]
    Linalg(#[from] LinalgError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
