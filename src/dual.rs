//! Truncated Taylor-series "dual number" forward-mode autodiff.
//!
//! A [`Dual`] of order `n` carries the coefficients `[a0, a1, ..., a_{n-1}]`
//! of the truncated series `a0 + a1*e + a2*e^2 + ... + a_{n-1}*e^{n-1}`,
//! where `e` is nilpotent of degree `n` (`e^n = 0`). Evaluating any analytic
//! function at a `Dual::variable(x, n)` yields the value together with its
//! first `n-1` derivatives at `x`, exactly, via the standard forward-mode
//! chain rule.
//!
//! `size` is fixed at construction and never changes; every binary operator
//! requires both operands to share it, failing with
//! [`DualError::SizeMismatch`] otherwise (checked here rather than asserted,
//! since a host embedding this engine in a live simulation should get a
//! catchable error rather than an abort on a user-data-driven order
//! mismatch).

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use thiserror::Error;

/// Errors raised by [`Dual`] arithmetic and elementary functions.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DualError {
    #[error("dual operands have mismatched order: {0} vs {1}")]
    SizeMismatch(usize, usize),

    #[error("division by a dual number with zero value")]
    DivisionByZeroDual,

    #[error("domain error: {0} is outside the function's real domain")]
    DomainError(&'static str),
}

/// A truncated Taylor series of fixed order `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dual {
    coeffs: Vec<f64>,
}

impl Dual {
    /// Builds a dual number from explicit coefficients. `coeffs` must be
    /// non-empty; `size = coeffs.len()`.
    pub fn from_coeffs(coeffs: Vec<f64>) -> Self {
        assert!(!coeffs.is_empty(), "Dual must carry at least one coefficient");
        Self { coeffs }
    }

    /// `variable(x, n) = [x, 1, 0, ..., 0]` of length `n` — seeds `d/dε = 1`
    /// so that evaluating a function at this value differentiates it.
    pub fn variable(x: f64, n: usize) -> Self {
        assert!(n >= 1, "dual order must be >= 1");
        let mut coeffs = vec![0.0; n];
        coeffs[0] = x;
        if n > 1 {
            coeffs[1] = 1.0;
        }
        Self { coeffs }
    }

    /// `const(x, n) = [x, 0, ..., 0]` of length `n` — a constant carries no
    /// derivative information.
    pub fn constant(x: f64, n: usize) -> Self {
        assert!(n >= 1, "dual order must be >= 1");
        let mut coeffs = vec![0.0; n];
        coeffs[0] = x;
        Self { coeffs }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.coeffs[0]
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Drops the last `k` coefficients, shrinking `size` by `k`.
    pub fn head(&self, k: usize) -> Self {
        let new_len = self.size().saturating_sub(k).max(1);
        Self {
            coeffs: self.coeffs[..new_len].to_vec(),
        }
    }

    /// Drops the first `k` coefficients, interpreted as differentiating `k`
    /// times: `tail(1)[i] = coeffs[i+1]`.
    pub fn tail(&self, k: usize) -> Self {
        if k >= self.size() {
            return Self {
                coeffs: vec![0.0],
            };
        }
        Self {
            coeffs: self.coeffs[k..].to_vec(),
        }
    }

    fn same_size(&self, other: &Self) -> Result<(), DualError> {
        if self.size() != other.size() {
            return Err(DualError::SizeMismatch(self.size(), other.size()));
        }
        Ok(())
    }

    /// Fallible addition; succeeds unless `size` mismatches.
    pub fn try_add(&self, other: &Self) -> Result<Self, DualError> {
        self.same_size(other)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self { coeffs })
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, DualError> {
        self.same_size(other)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self { coeffs })
    }

    /// Discrete convolution: `c_k = sum_{i=0..=k} a_i * b_{k-i}`.
    pub fn try_mul(&self, other: &Self) -> Result<Self, DualError> {
        self.same_size(other)?;
        let n = self.size();
        let mut coeffs = vec![0.0; n];
        for k in 0..n {
            let mut ck = 0.0;
            for i in 0..=k {
                ck += self.coeffs[i] * other.coeffs[k - i];
            }
            coeffs[k] = ck;
        }
        Ok(Self { coeffs })
    }

    /// Division by recurrence: `c_k = (a_k - sum_{i=1..=k} b_i*c_{k-i}) / b0`.
    pub fn try_div(&self, other: &Self) -> Result<Self, DualError> {
        self.same_size(other)?;
        if other.coeffs[0] == 0.0 {
            return Err(DualError::DivisionByZeroDual);
        }
        let n = self.size();
        let mut coeffs = vec![0.0; n];
        let b0 = other.coeffs[0];
        for k in 0..n {
            let mut acc = self.coeffs[k];
            for i in 1..=k {
                acc -= other.coeffs[i] * coeffs[k - i];
            }
            coeffs[k] = acc / b0;
        }
        Ok(Self { coeffs })
    }

    pub fn recip(&self) -> Result<Self, DualError> {
        Self::constant(1.0, self.size()).try_div(self)
    }

    /// Broadcasts a scalar to a constant dual of `size` equal to `self`'s,
    /// then convolves — equivalent to `try_mul` but never fails.
    pub fn scale(&self, c: f64) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|a| a * c).collect(),
        }
    }

    pub fn add_scalar(&self, c: f64) -> Self {
        let mut coeffs = self.coeffs.clone();
        coeffs[0] += c;
        Self { coeffs }
    }

    fn chain(&self, seed: impl Fn(f64) -> Vec<f64>) -> Self {
        // Evaluate the closed-form Taylor coefficients of the outer function
        // at the real value, then compose with `self`'s own series via the
        // standard Faà di Bruno substitution, which for a nilpotent
        // increment reduces to repeated convolution against `self.tail(0)`'s
        // offset-by-one structure. We implement composition directly by
        // building the outer series as a constant dual and convolving it
        // with powers of (self - value), which is algebraically the same
        // truncated composition used throughout this module.
        let n = self.size();
        let outer = seed(self.value());
        debug_assert_eq!(outer.len(), n);
        // `delta = self - value` has zero 0th coefficient, so its powers
        // truncate naturally: delta^n has no coefficients below index n.
        let mut delta = self.coeffs.clone();
        delta[0] = 0.0;
        let delta = Self { coeffs: delta };

        let mut result = vec![0.0; n];
        result[0] = outer[0];
        let mut power = Self::constant(1.0, n);
        for k in 1..n {
            power = power.try_mul(&delta).expect("matching size by construction");
            let term = power.scale(outer[k]);
            for i in 0..n {
                result[i] += term.coeffs[i];
            }
        }
        Self { coeffs: result }
    }

    /// Closed-form Taylor coefficients of `exp` at `x`, to order `n`: `x^k/k!`.
    fn taylor_exp(x: f64, n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n];
        let e = x.exp();
        let mut fact = 1.0;
        for (k, slot) in out.iter_mut().enumerate() {
            if k > 0 {
                fact *= k as f64;
            }
            *slot = e / fact;
        }
        out
    }

    pub fn exp(&self) -> Self {
        self.chain(|x| Self::taylor_exp(x, self.size()))
    }

    pub fn ln(&self) -> Result<Self, DualError> {
        if self.value() <= 0.0 {
            return Err(DualError::DomainError("ln of non-positive value"));
        }
        let n = self.size();
        let x0 = self.value();
        Ok(self.chain(move |_| {
            let mut out = vec![0.0; n];
            out[0] = x0.ln();
            // d^k/dx^k ln(x) at x0, divided by k!: (-1)^(k-1) / (k * x0^k) for k>=1
            for (k, slot) in out.iter_mut().enumerate().skip(1) {
                let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
                *slot = sign / (k as f64 * x0.powi(k as i32));
            }
            out
        }))
    }

    pub fn sqrt(&self) -> Result<Self, DualError> {
        if self.value() < 0.0 {
            return Err(DualError::DomainError("sqrt of negative value"));
        }
        if self.value() == 0.0 {
            // sqrt is non-analytic at 0; only the value is well defined.
            return Err(DualError::DomainError("sqrt of zero has no finite derivative series"));
        }
        let n = self.size();
        let x0 = self.value();
        Ok(self.chain(move |_| taylor_pow(x0, 0.5, n)))
    }

    /// `pow(x, r)` for real exponent `r`; domain-restricted to `x > 0` unless
    /// `r` is a non-negative integer (matching `f64::powf` semantics at the
    /// real-value level, but the dual series needs `x0 != 0` to expand at
    /// non-integer `r`).
    pub fn powf(&self, r: f64) -> Result<Self, DualError> {
        let x0 = self.value();
        if x0 <= 0.0 && r.fract() != 0.0 {
            return Err(DualError::DomainError("pow with non-integer exponent requires a positive base"));
        }
        let n = self.size();
        Ok(self.chain(move |_| taylor_pow(x0, r, n)))
    }

    /// Integer power via repeated self-multiplication (exact, no domain
    /// restriction beyond `size` matching, which is trivially satisfied).
    pub fn powi(&self, k: u32) -> Self {
        let mut result = Self::constant(1.0, self.size());
        for _ in 0..k {
            result = result.try_mul(self).expect("matching size by construction");
        }
        result
    }

    pub fn sin(&self) -> Self {
        let n = self.size();
        let x0 = self.value();
        self.chain(move |_| {
            let mut out = vec![0.0; n];
            for (k, slot) in out.iter_mut().enumerate() {
                let d = match k % 4 {
                    0 => x0.sin(),
                    1 => x0.cos(),
                    2 => -x0.sin(),
                    _ => -x0.cos(),
                };
                *slot = d / factorial(k);
            }
            out
        })
    }

    pub fn cos(&self) -> Self {
        let n = self.size();
        let x0 = self.value();
        self.chain(move |_| {
            let mut out = vec![0.0; n];
            for (k, slot) in out.iter_mut().enumerate() {
                let d = match k % 4 {
                    0 => x0.cos(),
                    1 => -x0.sin(),
                    2 => -x0.cos(),
                    _ => x0.sin(),
                };
                *slot = d / factorial(k);
            }
            out
        })
    }

    pub fn tan(&self) -> Result<Self, DualError> {
        let c = self.cos();
        if c.value() == 0.0 {
            return Err(DualError::DomainError("tan has a pole at this value"));
        }
        self.sin().try_div(&c)
    }

    pub fn sinh(&self) -> Self {
        let n = self.size();
        let x0 = self.value();
        self.chain(move |_| {
            let mut out = vec![0.0; n];
            for (k, slot) in out.iter_mut().enumerate() {
                let d = if k % 2 == 0 { x0.sinh() } else { x0.cosh() };
                *slot = d / factorial(k);
            }
            out
        })
    }

    pub fn cosh(&self) -> Self {
        let n = self.size();
        let x0 = self.value();
        self.chain(move |_| {
            let mut out = vec![0.0; n];
            for (k, slot) in out.iter_mut().enumerate() {
                let d = if k % 2 == 0 { x0.cosh() } else { x0.sinh() };
                *slot = d / factorial(k);
            }
            out
        })
    }

    pub fn tanh(&self) -> Self {
        let c = self.cosh();
        // cosh(x) > 0 for all real x, never a pole.
        self.sinh().try_div(&c).expect("cosh is never zero")
    }

    /// `coth = cosh/sinh`, undefined at `x = 0`.
    pub fn coth(&self) -> Result<Self, DualError> {
        let s = self.sinh();
        if s.value() == 0.0 {
            return Err(DualError::DomainError("coth has a pole at x = 0"));
        }
        self.cosh().try_div(&s)
    }

    /// `cot = cos/sin`, undefined wherever `sin(x) = 0`.
    pub fn cot(&self) -> Result<Self, DualError> {
        let s = self.sin();
        if s.value() == 0.0 {
            return Err(DualError::DomainError("cot has a pole at this value"));
        }
        self.cos().try_div(&s)
    }

    /// `csc = 1/sin`.
    pub fn csc(&self) -> Result<Self, DualError> {
        self.sin().recip()
    }

    /// `sec = 1/cos`.
    pub fn sec(&self) -> Result<Self, DualError> {
        self.cos().recip()
    }
}

fn factorial(k: usize) -> f64 {
    (1..=k).fold(1.0, |acc, i| acc * i as f64)
}

/// Taylor coefficients of `x -> x0^? ... (x0 + delta)^r` expanded about
/// `x0`, i.e. the generalized binomial series `C(r, k) * x0^(r-k)`.
fn taylor_pow(x0: f64, r: f64, n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n];
    let mut coef = 1.0;
    for k in 0..n {
        out[k] = coef * x0.powf(r - k as f64);
        coef *= (r - k as f64) / (k as f64 + 1.0);
    }
    out
}

impl Index<usize> for Dual {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.coeffs[i]
    }
}

impl IndexMut<usize> for Dual {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.coeffs[i]
    }
}

impl Neg for Dual {
    type Output = Dual;
    fn neg(self) -> Dual {
        Dual {
            coeffs: self.coeffs.iter().map(|a| -a).collect(),
        }
    }
}

impl Add for &Dual {
    type Output = Dual;
    fn add(self, other: &Dual) -> Dual {
        self.try_add(other).expect("Dual::add requires matching order")
    }
}

impl Sub for &Dual {
    type Output = Dual;
    fn sub(self, other: &Dual) -> Dual {
        self.try_sub(other).expect("Dual::sub requires matching order")
    }
}

impl Mul for &Dual {
    type Output = Dual;
    fn mul(self, other: &Dual) -> Dual {
        self.try_mul(other).expect("Dual::mul requires matching order")
    }
}

impl Div for &Dual {
    type Output = Dual;
    fn div(self, other: &Dual) -> Dual {
        self.try_div(other).expect("Dual::div requires matching order and nonzero divisor")
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coeffs[0])?;
        for (k, c) in self.coeffs.iter().enumerate().skip(1) {
            write!(f, " + {}*e^{}", c, k)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn variable_and_const_shape() {
        let v = Dual::variable(3.0, 3);
        assert_eq!(v.coeffs(), &[3.0, 1.0, 0.0]);
        let c = Dual::constant(5.0, 3);
        assert_eq!(c.coeffs(), &[5.0, 0.0, 0.0]);
    }

    #[test]
    fn addition_subtraction_constant_roundtrip() {
        let x = Dual::variable(2.0, 4);
        let y = x.add_scalar(7.0).add_scalar(-7.0);
        assert_abs_diff_eq!(y.value(), x.value(), epsilon = 1e-12);
        for k in 1..4 {
            assert_abs_diff_eq!(y[k], x[k], epsilon = 1e-12);
        }
    }

    #[test]
    fn mul_div_scalar_roundtrip() {
        let x = Dual::variable(2.0, 3);
        let y = x.scale(4.0).scale(0.25);
        assert_abs_diff_eq!(y.value(), x.value(), epsilon = 1e-12);
    }

    #[test]
    fn size_mismatch_is_an_error_not_a_panic() {
        let a = Dual::variable(1.0, 2);
        let b = Dual::variable(1.0, 3);
        assert_eq!(a.try_add(&b), Err(DualError::SizeMismatch(2, 3)));
    }

    #[test]
    fn division_by_zero_value_fails() {
        let a = Dual::variable(1.0, 2);
        let b = Dual::constant(0.0, 2);
        assert_eq!(a.try_div(&b), Err(DualError::DivisionByZeroDual));
    }

    #[test]
    fn sin_seed_scenario_matches_analytic_derivatives() {
        // Dual x = [3, 1, 0], order 3: sin(x) = [sin 3, cos 3, -sin(3)/2].
        let x = Dual::variable(3.0, 3);
        let s = x.sin();
        assert_abs_diff_eq!(s[0], 3f64.sin(), epsilon = 1e-9);
        assert_abs_diff_eq!(s[1], 3f64.cos(), epsilon = 1e-9);
        assert_abs_diff_eq!(s[2], -3f64.sin() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn exp_ln_inverse() {
        let x = Dual::variable(2.0, 4);
        let round_trip = x.exp().ln().unwrap();
        for k in 0..4 {
            assert_abs_diff_eq!(round_trip[k], x[k], epsilon = 1e-8);
        }
    }

    #[test]
    fn sqrt_squared_is_identity() {
        let x = Dual::variable(5.0, 3);
        let s = x.sqrt().unwrap();
        let squared = s.powi(2);
        for k in 0..3 {
            assert_abs_diff_eq!(squared[k], x[k], epsilon = 1e-9);
        }
    }

    #[test]
    fn sin_squared_plus_cos_squared_is_one() {
        let x = Dual::variable(1.234, 4);
        let s = x.sin();
        let c = x.cos();
        let sum = s.powi(2).try_add(&c.powi(2)).unwrap();
        assert_abs_diff_eq!(sum[0], 1.0, epsilon = 1e-9);
        for k in 1..4 {
            assert_abs_diff_eq!(sum[k], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn tan_pole_is_domain_error() {
        let x = Dual::variable(std::f64::consts::FRAC_PI_2, 2);
        assert!(matches!(x.tan(), Err(DualError::DomainError(_))));
    }

    #[test]
    fn head_and_tail_adjust_order() {
        let x = Dual::from_coeffs(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(x.head(2).coeffs(), &[1.0, 2.0]);
        assert_eq!(x.tail(1).coeffs(), &[2.0, 3.0, 4.0]);
    }
}
