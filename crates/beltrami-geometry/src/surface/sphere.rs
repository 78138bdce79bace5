//! Sphere marking the light position.

use std::f64::consts::PI;

use beltrami_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::domain::ParamRange;

/// Radius of the light marker.
pub const MARKER_RADIUS: f64 = 0.25;

/// Grid step along both angles.
pub const MARKER_STEP: f64 = 0.05;

/// A sphere parameterized by polar angle `phi` in `[0, PI]` and azimuth
/// `theta` in `[0, 2*PI]`:
///
/// `P(phi, theta) = center + radius * (sin phi cos theta, sin phi sin theta, cos phi)`
///
/// The per-vertex normal data is the evaluated position itself, not a unit
/// normal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSphere {
    pub center: Point3,
    pub radius: f64,
}

impl MarkerSphere {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Marker of the standard radius around `center`.
    pub fn at(center: Point3) -> Self {
        Self::new(center, MARKER_RADIUS)
    }
}

impl Surface for MarkerSphere {
    fn point_at(&self, phi: f64, theta: f64) -> Point3 {
        let x = self.radius * phi.sin() * theta.cos();
        let y = self.radius * phi.sin() * theta.sin();
        let z = self.radius * phi.cos();
        self.center + DVec3::new(x, y, z)
    }

    fn normal_at(&self, phi: f64, theta: f64) -> Vector3 {
        self.point_at(phi, theta)
    }

    fn domain_u(&self) -> ParamRange {
        ParamRange::closed(0.0, PI, MARKER_STEP)
    }

    fn domain_v(&self) -> ParamRange {
        ParamRange::closed(0.0, 2.0 * PI, MARKER_STEP)
    }
}
