//! Surface trait and the two surfaces the viewer draws.

mod pseudosphere;
mod sphere;

use beltrami_math::{Point3, Vector3};

use crate::domain::ParamRange;

pub use pseudosphere::{PseudosphericalSurface, SHAPE_CONSTANT, SURFACE_STEP};
pub use sphere::{MarkerSphere, MARKER_RADIUS, MARKER_STEP};

/// Trait for parametric surfaces sampled on a fixed grid.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Per-vertex normal data at parameters `(u, v)`.
    fn normal_at(&self, u: f64, v: f64) -> Vector3;

    /// Sampling of the u axis.
    fn domain_u(&self) -> ParamRange;

    /// Sampling of the v axis.
    fn domain_v(&self) -> ParamRange;
}
