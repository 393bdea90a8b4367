use crate::linalg::Vector3;

/// A bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(self, p: Vector3) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }

    /// The minimum enclosing sphere of `self` and `other`, with special
    /// cases when one already fully contains the other.
    pub fn union(self, other: Self) -> Self {
        let d = (other.center - self.center).norm();
        if d + other.radius <= self.radius {
            return self;
        }
        if d + self.radius <= other.radius {
            return other;
        }
        let radius = (self.radius + other.radius + d) / 2.0;
        let center = if d < 1e-12 {
            self.center
        } else {
            self.center + (other.center - self.center) * ((radius - self.radius) / d)
        };
        Self { center, radius }
    }
}
