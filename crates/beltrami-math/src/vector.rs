//! Free-standing vector helpers used by the surface evaluators.
//!
//! Positions and directions share the same [`Vector3`] type; callers track
//! which one they hold.

use crate::{Point3, Vector3};

/// Right-handed cross product `a x b`.
#[inline]
pub fn cross(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(
        a.y * b.z - b.y * a.z,
        a.z * b.x - b.z * a.x,
        a.x * b.y - b.x * a.y,
    )
}

/// Divide `v` by its length.
///
/// A zero-length input yields NaN components; nothing downstream filters
/// them out.
#[inline]
pub fn normalize(v: Vector3) -> Vector3 {
    v / v.length()
}

/// Forward difference quotient `(ahead - here) / delta`.
#[inline]
pub fn forward_difference(here: Point3, ahead: Point3, delta: f64) -> Vector3 {
    (ahead - here) / delta
}
