//! Phantom-typed quantities, affine scales, and a dimension registry for
//! converting between canonical and display units.

mod dimensions;
mod quantity;
mod registry;
mod scale;

pub use dimensions::{Capacitance, Current, DimensionTag, Frequency, Inductance, Resistance, Time, Voltage};
pub use quantity::{Quantity, QuantityScale, SourceQuantityScale, SI_PREFIXES};
pub use registry::{builtin_dimensions, classify, classify_auxiliary, load_overrides, AliasOverride, DimensionInfo, RegistryOverrides};
pub use scale::Scale;

use thiserror::Error;

/// Errors raised by the unit/quantity system's runtime (string-keyed)
/// surface. Arithmetic between `Quantity<U>` values of different `U` is
/// instead a compile error, since the phantom tag is enforced by the type
/// system rather than checked at runtime.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("no auxiliary units registered for dimension: {0}")]
    NoAuxiliaryUnits(String),

    #[error("invalid registry overrides document: {0}")]
    InvalidOverrides(String),

    #[error("quantities of different dimensions cannot be combined: {0} vs {1}")]
    UnitMismatch(String, String),
}
