use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::dimensions::DimensionTag;
use super::scale::Scale;

/// A scalar value in the canonical base unit of dimension `U`, carried as a
/// zero-cost newtype: the phantom tag adds no runtime representation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "")]
pub struct Quantity<U: DimensionTag> {
    value: f64,
    #[serde(skip)]
    _marker: PhantomData<U>,
}

impl<U: DimensionTag> Quantity<U> {
    pub fn from_canonical(value: f64) -> Self {
        Self { value, _marker: PhantomData }
    }

    pub fn from_scale(v: f64, scale: Scale) -> Self {
        Self::from_canonical(scale.map(v))
    }

    pub fn value(self) -> f64 {
        self.value
    }

    pub fn in_scale(self, scale: Scale) -> f64 {
        scale.unmap(self.value)
    }

    /// `self / other` of the same dimension cancels to a plain ratio.
    pub fn ratio_to(self, other: Self) -> f64 {
        self.value / other.value
    }
}

impl<U: DimensionTag> Add for Quantity<U> {
    type Output = Quantity<U>;
    fn add(self, rhs: Quantity<U>) -> Quantity<U> {
        Quantity::from_canonical(self.value + rhs.value)
    }
}

impl<U: DimensionTag> Sub for Quantity<U> {
    type Output = Quantity<U>;
    fn sub(self, rhs: Quantity<U>) -> Quantity<U> {
        Quantity::from_canonical(self.value - rhs.value)
    }
}

impl<U: DimensionTag> Neg for Quantity<U> {
    type Output = Quantity<U>;
    fn neg(self) -> Quantity<U> {
        Quantity::from_canonical(-self.value)
    }
}

impl<U: DimensionTag> Mul<f64> for Quantity<U> {
    type Output = Quantity<U>;
    fn mul(self, c: f64) -> Quantity<U> {
        Quantity::from_canonical(self.value * c)
    }
}

impl<U: DimensionTag> Div<f64> for Quantity<U> {
    type Output = Quantity<U>;
    fn div(self, c: f64) -> Quantity<U> {
        Quantity::from_canonical(self.value / c)
    }
}

/// Dimensional cancellation: a ratio of two quantities of the same
/// dimension is a plain real, not a `Quantity`.
impl<U: DimensionTag> Div for Quantity<U> {
    type Output = f64;
    fn div(self, rhs: Quantity<U>) -> f64 {
        self.ratio_to(rhs)
    }
}

/// A named affine scale tagged with the dimension it converts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityScale<U: DimensionTag> {
    pub symbol: &'static str,
    pub scale: Scale,
    _marker: PhantomData<U>,
}

impl<U: DimensionTag> QuantityScale<U> {
    pub fn new(symbol: &'static str, scale: Scale) -> Self {
        Self { symbol, scale, _marker: PhantomData }
    }

    pub fn quantity_from(self, v: f64) -> Quantity<U> {
        Quantity::from_scale(v, self.scale)
    }

    pub fn value_of(self, q: Quantity<U>) -> f64 {
        q.in_scale(self.scale)
    }
}

/// The standard SI magnitude prefixes this system precomputes scales for.
pub const SI_PREFIXES: [(&str, f64); 9] = [
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("", 1e0),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

/// A dimension's canonical scale plus a precomputed table of its SI-prefixed
/// multiples (`pico` through `tera`), so display code never recomputes a
/// prefix's scale from scratch.
#[derive(Debug, Clone)]
pub struct SourceQuantityScale<U: DimensionTag> {
    pub canonical: QuantityScale<U>,
    pub multiples: Vec<QuantityScale<U>>,
}

impl<U: DimensionTag> SourceQuantityScale<U> {
    /// Builds the canonical unit scale plus every `{pico..tera}` multiple,
    /// leaking the prefixed symbol strings (`"mΩ"`, `"kΩ"`, ...) once at
    /// startup since the table is built a handful of times, not per query.
    pub fn with_si_prefixes() -> Self {
        let canonical = QuantityScale::new(U::SYMBOL, Scale::IDENTITY);
        let multiples = SI_PREFIXES
            .iter()
            .map(|&(prefix, factor)| {
                let symbol: &'static str = Box::leak(format!("{prefix}{}", U::SYMBOL).into_boxed_str());
                QuantityScale::new(symbol, Scale::new(factor, 0.0))
            })
            .collect();
        Self { canonical, multiples }
    }

    /// The prefixed scale whose magnitude puts `value` (in canonical units)
    /// closest to the `[1, 1000)` display range.
    pub fn best_fit(&self, value: f64) -> QuantityScale<U> {
        if value == 0.0 {
            return self.canonical;
        }
        let target = value.abs();
        self.multiples
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (target / a.scale.factor).log10().abs();
                let db = (target / b.scale.factor).log10().abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::dimensions::Resistance;

    #[test]
    fn quantity_arithmetic_stays_in_canonical_units() {
        let a = Quantity::<Resistance>::from_canonical(10.0);
        let b = Quantity::<Resistance>::from_canonical(5.0);
        assert_eq!((a + b).value(), 15.0);
        assert_eq!((a - b).value(), 5.0);
        assert_eq!((-a).value(), -10.0);
        assert_eq!((a * 2.0).value(), 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn same_dimension_division_cancels_to_a_plain_ratio() {
        let a = Quantity::<Resistance>::from_canonical(10.0);
        let b = Quantity::<Resistance>::from_canonical(4.0);
        assert_eq!(a / b, 2.5);
        assert_eq!(a.ratio_to(b), 2.5);
    }

    #[test]
    fn quantity_scale_round_trips_through_a_named_unit() {
        let milliohm = QuantityScale::<Resistance>::new("mΩ", Scale::new(1e-3, 0.0));
        let q = milliohm.quantity_from(470.0);
        assert!((q.value() - 0.47).abs() < 1e-12);
        assert!((milliohm.value_of(q) - 470.0).abs() < 1e-9);
    }

    #[test]
    fn best_fit_picks_milli_for_small_resistances() {
        let source = SourceQuantityScale::<Resistance>::with_si_prefixes();
        let fit = source.best_fit(0.0047);
        assert_eq!(fit.symbol, "mΩ");
    }

    #[test]
    fn best_fit_picks_kilo_for_large_resistances() {
        let source = SourceQuantityScale::<Resistance>::with_si_prefixes();
        let fit = source.best_fit(4700.0);
        assert_eq!(fit.symbol, "kΩ");
    }
}
