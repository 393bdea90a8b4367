use std::ops::{Add, Index, IndexMut, Sub};

use crate::dual::Dual;

use super::{LinalgError, Vector2, Vector3, Vector4};

macro_rules! dual_vector {
    ($name:ident, $real:ident, [$($field:ident => $idx:expr),+ $(,)?]) => {
        #[doc = concat!("A ", stringify!($real), "-shaped vector of dual numbers, carrying ",
            "derivative information alongside each component's value.")]
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(pub $field: Dual,)+
        }

        impl $name {
            /// Builds from component duals, failing if they don't share a dual order.
            pub fn new($($field: Dual),+) -> Result<Self, LinalgError> {
                let sizes = [$($field.size()),+];
                if sizes.iter().any(|&s| s != sizes[0]) {
                    return Err(LinalgError::SizeMismatch(sizes[0], sizes.iter().copied().max().unwrap()));
                }
                Ok(Self { $($field),+ })
            }

            /// Lifts a real vector into constant duals of the given order.
            pub fn constant(v: $real, n: usize) -> Self {
                Self { $($field: Dual::constant(v.$field, n),)+ }
            }

            pub fn size(&self) -> usize {
                self.first_size()
            }

            fn first_size(&self) -> usize {
                [$(self.$field.size()),+][0]
            }

            /// The real-valued (zeroth order) part of this vector.
            pub fn value(&self) -> $real {
                $real::new($(self.$field.value()),+)
            }

            pub fn dot(&self, other: &Self) -> Result<Dual, crate::dual::DualError> {
                let mut acc = Dual::constant(0.0, self.first_size());
                $(acc = acc.try_add(&self.$field.try_mul(&other.$field)?)?;)+
                Ok(acc)
            }
        }

        impl Index<usize> for $name {
            type Output = Dual;
            fn index(&self, i: usize) -> &Dual {
                match i {
                    $($idx => &self.$field,)+
                    _ => panic!("index {} out of range for {}", i, stringify!($name)),
                }
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut Dual {
                match i {
                    $($idx => &mut self.$field,)+
                    _ => panic!("index {} out of range for {}", i, stringify!($name)),
                }
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name { $($field: &self.$field + &rhs.$field,)+ }
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: &self.$field - &rhs.$field,)+ }
            }
        }
    };
}

dual_vector!(DualVector2, Vector2, [x => 0, y => 1]);
dual_vector!(DualVector3, Vector3, [x => 0, y => 1, z => 2]);
dual_vector!(DualVector4, Vector4, [x => 0, y => 1, z => 2, w => 3]);

impl DualVector3 {
    pub fn cross(&self, other: &Self) -> Result<Self, crate::dual::DualError> {
        Ok(Self {
            x: self.y.try_mul(&other.z)?.try_sub(&self.z.try_mul(&other.y)?)?,
            y: self.z.try_mul(&other.x)?.try_sub(&self.x.try_mul(&other.z)?)?,
            z: self.x.try_mul(&other.y)?.try_sub(&self.y.try_mul(&other.x)?)?,
        })
    }
}
