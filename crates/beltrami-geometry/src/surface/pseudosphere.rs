//! Pseudospherical surface of Beltrami type.

use std::f64::consts::PI;

use beltrami_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::domain::ParamRange;
use crate::normal::{finite_difference_normal, NORMAL_DELTA};

/// Shape constant `C` of the surface equations.
pub const SHAPE_CONSTANT: f64 = 2.0;

/// Grid step along both parameter axes.
pub const SURFACE_STEP: f64 = 0.03;

/// Closed-form surface with shape constant `c`:
///
/// ```text
/// fi(u)   = -u / sqrt(c+1) + atan(sqrt(c+1) * tan u)
/// a(u,v)  = 2 / (c+1 - c sin^2 v cos^2 u)
/// r(u,v)  = a / sqrt(c) * sqrt((c+1)(1 + c sin^2 u)) * sin v
/// P(u,v)  = (r cos fi, r sin fi, (ln tan(v/2) + a (c+1) cos v) / sqrt(c))
/// ```
///
/// Sampled over `u` in `[-3.5 PI, 3.5 PI]` and `v` in `[0.005 PI, PI/2)`.
/// Points where `tan u` or `ln tan(v/2)` blow up come back non-finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PseudosphericalSurface {
    pub c: f64,
    pub step: f64,
    pub normal_delta: f64,
}

impl PseudosphericalSurface {
    pub fn new() -> Self {
        Self {
            c: SHAPE_CONSTANT,
            step: SURFACE_STEP,
            normal_delta: NORMAL_DELTA,
        }
    }

    /// Evaluate the surface equations.
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let c = self.c;
        let sqrt_c1 = (c + 1.0).sqrt();
        let sqrt_c = c.sqrt();

        let fi = -u / sqrt_c1 + (sqrt_c1 * u.tan()).atan();
        let a = 2.0 / (c + 1.0 - c * v.sin().powi(2) * u.cos().powi(2));
        let r = (a / sqrt_c) * ((c + 1.0) * (1.0 + c * u.sin().powi(2))).sqrt() * v.sin();

        let x = r * fi.cos();
        let y = r * fi.sin();
        let z = ((v / 2.0).tan().ln() + a * (c + 1.0) * v.cos()) / sqrt_c;

        DVec3::new(x, y, z)
    }
}

impl Default for PseudosphericalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PseudosphericalSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.evaluate(u, v)
    }

    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        finite_difference_normal(|u, v| self.evaluate(u, v), u, v, self.normal_delta)
    }

    fn domain_u(&self) -> ParamRange {
        ParamRange::closed(-3.5 * PI, 3.5 * PI, self.step)
    }

    fn domain_v(&self) -> ParamRange {
        ParamRange::half_open(0.005 * PI, PI / 2.0, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meridian_point() {
        // u = 0: fi = 0, a = 1 at v = PI/4, so r = sqrt(3)/2.
        let s = PseudosphericalSurface::new();
        let p = s.point_at(0.0, PI / 4.0);
        assert_relative_eq!(p.x, 3.0_f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.8767747598597695, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let s = PseudosphericalSurface::new();
        for &(u, v) in &[(0.3, 0.7), (-9.1, 0.2), (10.9, 1.5)] {
            let a = s.point_at(u, v);
            let b = s.point_at(u, v);
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }

    #[test]
    fn test_v_zero_is_not_finite() {
        let s = PseudosphericalSurface::new();
        let p = s.point_at(0.0, 0.0);
        assert_eq!(p.z, f64::NEG_INFINITY);
    }

    #[test]
    fn test_normals_are_unit_away_from_edges() {
        let s = PseudosphericalSurface::new();
        for &(u, v) in &[(0.3, 0.7), (1.0, 0.4), (-2.5, 1.2), (7.0, 0.9)] {
            let n = s.normal_at(u, v);
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_normal_is_perpendicular_to_tangents() {
        let s = PseudosphericalSurface::new();
        let (u, v) = (0.3, 0.7);
        let n = s.normal_at(u, v);
        let h = 1e-6;
        let du = (s.point_at(u + h, v) - s.point_at(u, v)) / h;
        let dv = (s.point_at(u, v + h) - s.point_at(u, v)) / h;
        assert!(n.dot(du.normalize()).abs() < 1e-2);
        assert!(n.dot(dv.normalize()).abs() < 1e-2);
    }

    #[test]
    fn test_domain_sizes() {
        let s = PseudosphericalSurface::new();
        assert_eq!(s.domain_u().count(), 734);
        assert_eq!(s.domain_v().count(), 52);
    }
}
