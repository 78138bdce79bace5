pub mod aabb;
pub mod transform;
pub mod vector;

pub use glam::{DMat4, DVec3};
pub use aabb::Aabb3;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
