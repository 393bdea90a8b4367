use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use approx::AbsDiffEq;

use super::COMPARE_EPSILON;

macro_rules! real_vector {
    ($name:ident, $dim:expr, [$($field:ident => $idx:expr),+ $(,)?]) => {
        #[doc = concat!("A ", stringify!($dim), "D real-valued vector.")]
        #[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(pub $field: f64,)+
        }

        impl $name {
            pub const ZERO: $name = $name { $($field: 0.0,)+ };

            pub fn new($($field: f64),+) -> Self {
                Self { $($field),+ }
            }

            /// Constructs from a flat array in component order.
            pub fn from_array(a: [f64; $dim]) -> Self {
                Self { $($field: a[$idx]),+ }
            }

            pub fn to_array(self) -> [f64; $dim] {
                [$(self.$field),+]
            }

            pub fn dot(self, other: Self) -> f64 {
                0.0 $(+ self.$field * other.$field)+
            }

            pub fn norm_squared(self) -> f64 {
                self.dot(self)
            }

            pub fn norm(self) -> f64 {
                self.norm_squared().sqrt()
            }

            /// Normalizes, returning the zero vector (not NaN) when the
            /// magnitude is (numerically) zero.
            pub fn normalize_or_zero(self) -> Self {
                let n = self.norm();
                if n <= super::SINGULAR_EPSILON {
                    Self::ZERO
                } else {
                    self * (1.0 / n)
                }
            }

            /// Fallible normalization: `None` when the magnitude is
            /// (numerically) zero.
            pub fn try_normalize(self) -> Option<Self> {
                let n = self.norm();
                if n <= super::SINGULAR_EPSILON {
                    None
                } else {
                    Some(self * (1.0 / n))
                }
            }

            pub fn lerp(self, other: Self, t: f64) -> Self {
                self + (other - self) * t
            }

            pub fn abs_diff_eq(self, other: Self, epsilon: f64) -> bool {
                $((self.$field - other.$field).abs() <= epsilon)&&+
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name { $($field: -self.$field),+ }
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, s: f64) -> $name {
                $name { $($field: self.$field * s),+ }
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, s: f64) -> $name {
                $name { $($field: self.$field / s),+ }
            }
        }

        impl Index<usize> for $name {
            type Output = f64;
            fn index(&self, i: usize) -> &f64 {
                match i {
                    $($idx => &self.$field,)+
                    _ => panic!("index {} out of range for {}", i, stringify!($name)),
                }
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut f64 {
                match i {
                    $($idx => &mut self.$field,)+
                    _ => panic!("index {} out of range for {}", i, stringify!($name)),
                }
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = f64;
            fn default_epsilon() -> f64 {
                COMPARE_EPSILON
            }
            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                $name::abs_diff_eq(*self, *other, epsilon)
            }
        }
    };
}

real_vector!(Vector2, 2, [x => 0, y => 1]);
real_vector!(Vector3, 3, [x => 0, y => 1, z => 2]);
real_vector!(Vector4, 4, [x => 0, y => 1, z => 2, w => 3]);

impl Vector3 {
    pub fn cross(self, other: Self) -> Self {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns a unit vector perpendicular to `self`, choosing a numerically
    /// stable alternate axis when `self`'s preferred axis (x) is nearly
    /// parallel to it.
    pub fn perpendicular(self) -> Self {
        let axis = if self.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        self.cross(axis).normalize_or_zero()
    }

    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

impl Vector4 {
    pub fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3> for Vector4 {
    fn from(v: Vector3) -> Self {
        Vector4::new(v.x, v.y, v.z, 1.0)
    }
}

macro_rules! int_vector {
    ($name:ident, [$($field:ident),+ $(,)?]) => {
        #[doc = "An integer lattice coordinate."]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(pub $field: i64,)+
        }

        impl $name {
            pub fn new($($field: i64),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: self.$field - rhs.$field),+ }
            }
        }
    };
}

int_vector!(Vector2i, [x, y]);
int_vector!(Vector3i, [x, y, z]);
int_vector!(Vector4i, [x, y, z, w]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_norm() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.dot(v), 25.0);
    }

    #[test]
    fn normalize_zero_yields_zero_not_nan() {
        let v = Vector3::ZERO;
        let n = v.normalize_or_zero();
        assert_eq!(n, Vector3::ZERO);
        assert!(v.try_normalize().is_none());
    }

    #[test]
    fn cross_product_is_perpendicular() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.dot(a)).abs() < 1e-12);
        assert!((c.dot(b)).abs() < 1e-12);
        assert_eq!(c, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn perpendicular_is_unit_and_orthogonal() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let p = v.perpendicular();
        assert!((p.norm() - 1.0).abs() < 1e-9);
        assert!(p.dot(v).abs() < 1e-9);

        // Degenerate axis-aligned case still produces a stable, non-zero result.
        let v2 = Vector3::new(0.999, 0.001, 0.0);
        let p2 = v2.perpendicular();
        assert!((p2.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vector4_from_vector3_appends_w_one() {
        let v3 = Vector3::new(1.0, 2.0, 3.0);
        let v4: Vector4 = v3.into();
        assert_eq!(v4, Vector4::new(1.0, 2.0, 3.0, 1.0));
    }
}
