//! Volumetric primitives: axis-aligned and oriented bounding boxes, bounding
//! spheres, planes, and ray/line intersection queries against all of them.

mod aabb;
mod obb;
mod plane;
mod ray;
mod sphere;

pub use aabb::{Aabb2, Aabb3, Containment};
pub use obb::Obb;
pub use plane::Plane;
pub use ray::{Line, Ray};
pub use sphere::Sphere;
