use crate::dual::{Dual, DualError};

use super::{DualVector3, LinalgError, Matrix3};

/// A 3x3 matrix of dual numbers, used to carry Jacobian information through
/// rotation and pose composition.
#[derive(Debug, Clone, PartialEq)]
pub struct DualMatrix3 {
    pub cols: [DualVector3; 3],
}

impl DualMatrix3 {
    /// Lifts a real matrix into constant duals of the given order.
    pub fn constant(m: Matrix3, n: usize) -> Self {
        Self {
            cols: [
                DualVector3::constant(m.col(0), n),
                DualVector3::constant(m.col(1), n),
                DualVector3::constant(m.col(2), n),
            ],
        }
    }

    pub fn from_columns(c0: DualVector3, c1: DualVector3, c2: DualVector3) -> Result<Self, LinalgError> {
        let sizes = [c0.size(), c1.size(), c2.size()];
        if sizes.iter().any(|&s| s != sizes[0]) {
            return Err(LinalgError::SizeMismatch(sizes[0], sizes.iter().copied().max().unwrap()));
        }
        Ok(Self { cols: [c0, c1, c2] })
    }

    pub fn size(&self) -> usize {
        self.cols[0].size()
    }

    /// The real-valued (zeroth order) part of this matrix.
    pub fn value(&self) -> Matrix3 {
        Matrix3::from_columns(self.cols[0].value(), self.cols[1].value(), self.cols[2].value())
    }

    pub fn get(&self, i: usize, j: usize) -> &Dual {
        &self.cols[j][i]
    }

    pub fn apply(&self, v: &DualVector3) -> Result<DualVector3, DualError> {
        let n = self.size();
        let mut out = [Dual::constant(0.0, n), Dual::constant(0.0, n), Dual::constant(0.0, n)];
        for i in 0..3 {
            let mut acc = Dual::constant(0.0, n);
            for j in 0..3 {
                acc = acc.try_add(&self.get(i, j).try_mul(&v[j])?)?;
            }
            out[i] = acc;
        }
        let [x, y, z] = out;
        DualVector3::new(x, y, z).map_err(|_| DualError::SizeMismatch(n, n))
    }

    pub fn mul(&self, other: &DualMatrix3) -> Result<DualMatrix3, DualError> {
        let c0 = self.apply(&other.cols[0])?;
        let c1 = self.apply(&other.cols[1])?;
        let c2 = self.apply(&other.cols[2])?;
        DualMatrix3::from_columns(c0, c1, c2).map_err(|_| DualError::SizeMismatch(self.size(), self.size()))
    }

    pub fn transpose(&self) -> DualMatrix3 {
        let row = |i: usize| DualVector3::new(
            self.cols[0][i].clone(),
            self.cols[1][i].clone(),
            self.cols[2][i].clone(),
        ).expect("rows of a well-formed dual matrix share a dual order");
        DualMatrix3 { cols: [row(0), row(1), row(2)] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_lift_round_trips_value() {
        let m = Matrix3::IDENTITY;
        let dm = DualMatrix3::constant(m, 2);
        assert_eq!(dm.value(), m);
    }

    #[test]
    fn apply_identity_is_identity() {
        let dm = DualMatrix3::constant(Matrix3::IDENTITY, 1);
        let v = DualVector3::constant(super::super::Vector3::new(1.0, 2.0, 3.0), 1);
        let out = dm.apply(&v).unwrap();
        assert_eq!(out.value(), super::super::Vector3::new(1.0, 2.0, 3.0));
    }
}
