/// An affine map `u ↦ factor·u + base`, with `unmap` as its inverse.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scale {
    pub factor: f64,
    pub base: f64,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { factor: 1.0, base: 0.0 };

    pub fn new(factor: f64, base: f64) -> Self {
        Self { factor, base }
    }

    pub fn map(self, u: f64) -> f64 {
        self.factor * u + self.base
    }

    pub fn unmap(self, v: f64) -> f64 {
        (v - self.base) / self.factor
    }

    /// Composes two affine maps: `(self ∘ inner)(u) = self.map(inner.map(u))`.
    pub fn compose(self, inner: Scale) -> Scale {
        Scale {
            factor: self.factor * inner.factor,
            base: self.factor * inner.base + self.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_unmap_round_trip() {
        let s = Scale::new(1000.0, -273.15);
        let v = s.map(42.0);
        assert!((s.unmap(v) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn identity_is_a_no_op() {
        assert_eq!(Scale::IDENTITY.map(7.0), 7.0);
        assert_eq!(Scale::IDENTITY.unmap(7.0), 7.0);
    }

    #[test]
    fn compose_matches_sequential_application() {
        let outer = Scale::new(2.0, 1.0);
        let inner = Scale::new(3.0, 5.0);
        let composed = outer.compose(inner);
        let direct = outer.map(inner.map(10.0));
        assert!((composed.map(10.0) - direct).abs() < 1e-9);
    }
}
