use crate::linalg::{Vector2, Vector3};

/// Result of comparing how two bounding volumes relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// The volumes do not overlap at all.
    Disjoint,
    /// The volumes overlap but neither strictly contains the other.
    Intersected,
    /// `self` strictly contains the other volume.
    Contains,
}

macro_rules! aabb {
    ($name:ident, $vec:ident, [$($field:ident),+ $(,)?]) => {
        #[doc = concat!("An axis-aligned bounding box in ", stringify!($vec), " space.")]
        #[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub min: $vec,
            pub max: $vec,
        }

        impl $name {
            pub const ZERO: $name = $name { min: $vec::ZERO, max: $vec::ZERO };

            /// Builds from two corners, ordering them componentwise so that
            /// `min <= max` holds regardless of input order.
            pub fn new(a: $vec, b: $vec) -> Self {
                Self {
                    min: $vec { $($field: a.$field.min(b.$field)),+ },
                    max: $vec { $($field: a.$field.max(b.$field)),+ },
                }
            }

            pub fn center(self) -> $vec {
                (self.min + self.max) * 0.5
            }

            pub fn half_size(self) -> $vec {
                (self.max - self.min) * 0.5
            }

            pub fn contains_point(self, p: $vec) -> bool {
                $(p.$field >= self.min.$field && p.$field <= self.max.$field)&&+
            }

            /// Elementwise min/max union.
            pub fn union(self, other: Self) -> Self {
                Self {
                    min: $vec { $($field: self.min.$field.min(other.min.$field)),+ },
                    max: $vec { $($field: self.max.$field.max(other.max.$field)),+ },
                }
            }

            /// Elementwise max/min intersection, collapsed to `ZERO` when it
            /// becomes invalid (no overlap on some axis).
            pub fn intersection(self, other: Self) -> Self {
                let min = $vec { $($field: self.min.$field.max(other.min.$field)),+ };
                let max = $vec { $($field: self.max.$field.min(other.max.$field)),+ };
                if $(min.$field > max.$field)||+ {
                    Self::ZERO
                } else {
                    Self { min, max }
                }
            }

            pub fn intersects(self, other: Self) -> bool {
                $(self.min.$field <= other.max.$field && other.min.$field <= self.max.$field)&&+
            }

            fn strictly_contains(self, other: Self) -> bool {
                $(self.min.$field <= other.min.$field && self.max.$field >= other.max.$field)&&+
            }

            pub fn evaluate_containment(self, other: Self) -> Containment {
                if !self.intersects(other) {
                    Containment::Disjoint
                } else if self.strictly_contains(other) {
                    Containment::Contains
                } else {
                    Containment::Intersected
                }
            }
        }
    };
}

aabb!(Aabb2, Vector2, [x, y]);
aabb!(Aabb3, Vector3, [x, y, z]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_intersection_bound_both_inputs() {
        let a = Aabb3::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        let b = Aabb3::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(3.0, 3.0, 3.0));
        let u = a.union(b);
        assert_eq!(u.min, Vector3::ZERO);
        assert_eq!(u.max, Vector3::new(3.0, 3.0, 3.0));
        let i = a.intersection(b);
        assert_eq!(i.min, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(i.max, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn self_intersection_and_union_are_identity() {
        let a = Aabb2::new(Vector2::new(-1.0, -1.0), Vector2::new(1.0, 1.0));
        assert_eq!(a.intersection(a), a);
        assert_eq!(a.union(a), a);
    }

    #[test]
    fn disjoint_boxes_yield_zero_intersection() {
        let a = Aabb2::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0));
        let b = Aabb2::new(Vector2::new(5.0, 5.0), Vector2::new(6.0, 6.0));
        assert_eq!(a.intersection(b), Aabb2::ZERO);
        assert_eq!(a.evaluate_containment(b), Containment::Disjoint);
    }

    #[test]
    fn partial_overlap_is_intersected_not_contains() {
        let a = Aabb3::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        let b = Aabb3::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a.evaluate_containment(b), Containment::Intersected);
    }

    #[test]
    fn strict_containment_is_reported() {
        let outer = Aabb3::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, 10.0, 10.0));
        let inner = Aabb3::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(outer.evaluate_containment(inner), Containment::Contains);
    }
}
