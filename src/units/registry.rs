use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::UnitsError;

/// Static metadata about one registered dimension, used to resolve a
/// dimension by name at the boundaries where generics aren't available
/// (classification, TOML-driven alias lookup).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionInfo {
    pub name: &'static str,
    pub symbol: &'static str,
}

/// The compile-time list of dimensions this crate knows about. Per the
/// registry's design, this is an explicit list rather than anything
/// discovered by walking declared types at runtime.
pub fn builtin_dimensions() -> &'static [DimensionInfo] {
    const DIMENSIONS: &[DimensionInfo] = &[
        DimensionInfo { name: "Resistance", symbol: "Ω" },
        DimensionInfo { name: "Voltage", symbol: "V" },
        DimensionInfo { name: "Current", symbol: "A" },
        DimensionInfo { name: "Capacitance", symbol: "F" },
        DimensionInfo { name: "Inductance", symbol: "H" },
        DimensionInfo { name: "Time", symbol: "s" },
        DimensionInfo { name: "Frequency", symbol: "Hz" },
    ];
    DIMENSIONS
}

fn lookup(name: &str) -> Option<DimensionInfo> {
    builtin_dimensions().iter().copied().find(|d| d.name == name)
}

/// One auxiliary display unit for a dimension, loaded from a TOML overrides
/// file rather than built in (e.g. a house style's preferred alias).
#[derive(Debug, Clone, Deserialize)]
pub struct AliasOverride {
    pub dimension: String,
    pub symbol: String,
    pub factor: f64,
    #[serde(default)]
    pub base: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegistryOverrides {
    #[serde(default)]
    pub aliases: Vec<AliasOverride>,
}

static AUXILIARY_ALIASES: Lazy<Mutex<HashMap<String, Vec<AliasOverride>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Parses a TOML overrides document and merges its aliases into the
/// process-wide auxiliary table. Idempotent: reloading the same document
/// just replaces entries for the dimensions it names. Logs at `warn` when an
/// alias symbol already existed for a dimension and is being replaced.
pub fn load_overrides(toml_source: &str) -> Result<(), UnitsError> {
    let overrides: RegistryOverrides =
        toml::from_str(toml_source).map_err(|e| UnitsError::InvalidOverrides(e.to_string()))?;

    let mut table = AUXILIARY_ALIASES.lock().expect("auxiliary alias table poisoned");
    for alias in overrides.aliases {
        if lookup(&alias.dimension).is_none() {
            return Err(UnitsError::UnknownDimension(alias.dimension));
        }
        let entries = table.entry(alias.dimension.clone()).or_default();
        if let Some(existing) = entries.iter_mut().find(|e: &&mut AliasOverride| e.symbol == alias.symbol) {
            log::warn!("replacing existing unit alias {} for dimension {}", alias.symbol, alias.dimension);
            *existing = alias;
        } else {
            entries.push(alias);
        }
    }
    Ok(())
}

/// Picks the best-fitting builtin SI-prefixed symbol for `value` (given in
/// canonical units) under `dimension_name`.
pub fn classify(value: f64, dimension_name: &str) -> Result<String, UnitsError> {
    let info = lookup(dimension_name).ok_or_else(|| UnitsError::UnknownDimension(dimension_name.to_string()))?;
    let prefixes = super::quantity::SI_PREFIXES;
    if value == 0.0 {
        return Ok(format!("0 {}", info.symbol));
    }
    let target = value.abs();
    let (prefix, factor) = prefixes
        .iter()
        .copied()
        .min_by(|&(_, a), &(_, b)| {
            let da = (target / a).log10().abs();
            let db = (target / b).log10().abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(("", 1.0));
    Ok(format!("{:.3} {}{}", value / factor, prefix, info.symbol))
}

/// Same as [`classify`] but only considers auxiliary aliases loaded via
/// [`load_overrides`], failing if none are registered for the dimension.
pub fn classify_auxiliary(value: f64, dimension_name: &str) -> Result<String, UnitsError> {
    if lookup(dimension_name).is_none() {
        return Err(UnitsError::UnknownDimension(dimension_name.to_string()));
    }
    let table = AUXILIARY_ALIASES.lock().expect("auxiliary alias table poisoned");
    let candidates = table
        .get(dimension_name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| UnitsError::NoAuxiliaryUnits(dimension_name.to_string()))?;

    let target = value.abs();
    let best = candidates
        .iter()
        .min_by(|a, b| {
            let da = (target / a.factor).log10().abs();
            let db = (target / b.factor).log10().abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("candidates is non-empty");
    Ok(format!("{:.3} {}", (value - best.base) / best.factor, best.symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_picks_milli_prefix_for_small_values() {
        let label = classify(0.0047, "Resistance").unwrap();
        assert!(label.ends_with("mΩ"), "got {label}");
    }

    #[test]
    fn classify_rejects_unknown_dimension() {
        assert!(matches!(classify(1.0, "Smell"), Err(UnitsError::UnknownDimension(_))));
    }

    #[test]
    fn load_overrides_then_classify_auxiliary_finds_the_alias() {
        load_overrides(
            r#"
            [[aliases]]
            dimension = "Capacitance"
            symbol = "nF_test_alias"
            factor = 1e-9
            "#,
        )
        .unwrap();
        let label = classify_auxiliary(2e-9, "Capacitance").unwrap();
        assert!(label.contains("nF_test_alias"), "got {label}");
    }

    #[test]
    fn classify_auxiliary_without_overrides_fails() {
        assert!(matches!(
            classify_auxiliary(1.0, "Inductance"),
            Err(UnitsError::NoAuxiliaryUnits(_))
        ));
    }
}
