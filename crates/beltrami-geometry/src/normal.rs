//! Surface normals by forward finite differencing.

use beltrami_math::vector::{cross, forward_difference, normalize};
use beltrami_math::{Point3, Vector3};

/// Parameter offset used for the forward differences.
pub const NORMAL_DELTA: f64 = 0.001;

/// Estimate the unit normal of `eval` at `(u, v)`.
///
/// The partial derivatives are forward differences over `delta`, and the
/// normal is `normalize(dP/du x dP/dv)`. Where the derivatives are parallel
/// or the surface is non-finite, the result carries NaN components.
pub fn finite_difference_normal<F>(eval: F, u: f64, v: f64, delta: f64) -> Vector3
where
    F: Fn(f64, f64) -> Point3,
{
    let here = eval(u, v);
    let along_u = eval(u + delta, v);
    let along_v = eval(u, v + delta);

    let du = forward_difference(here, along_u, delta);
    let dv = forward_difference(here, along_v, delta);

    normalize(cross(du, dv))
}
