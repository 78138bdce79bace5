//! Orbiting spotlight.

use beltrami_math::vector::normalize;
use beltrami_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Point the light orbits and aims at.
pub const ORBIT_CENTER: Point3 = DVec3::ZERO;
pub const ORBIT_RADIUS: f64 = 3.0;
/// Angular speed in radians per second.
pub const ORBIT_SPEED: f64 = 1.0;
/// Length of the debug line drawn along the spot direction.
pub const LINE_LENGTH: f64 = 3.0;

/// Path the light follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitMode {
    /// `(cos t, cos t, sin t)`: x and y move together, so the light sweeps an
    /// ellipse in the plane `x = y`.
    #[default]
    Faithful,
    /// `(cos t, sin t, 0)`: a circle in the xy plane.
    Circular,
}

/// Light placement for one frame. Recomputed from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub position: Point3,
    pub spot_direction: Vector3,
    pub line_end: Point3,
}

impl LightState {
    /// Light placement at `elapsed` seconds.
    pub fn at_time(elapsed: f64, mode: OrbitMode) -> Self {
        let angle = elapsed * ORBIT_SPEED;
        let offset = match mode {
            OrbitMode::Faithful => DVec3::new(angle.cos(), angle.cos(), angle.sin()),
            OrbitMode::Circular => DVec3::new(angle.cos(), angle.sin(), 0.0),
        };
        let position = ORBIT_CENTER + ORBIT_RADIUS * offset;
        let spot_direction = normalize(ORBIT_CENTER - position);
        let line_end = position + spot_direction * LINE_LENGTH;

        Self {
            position,
            spot_direction,
            line_end,
        }
    }

    /// The debug line `position -> line_end` as two packed vertices.
    pub fn line_vertices(&self) -> [f32; 6] {
        [
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
            self.line_end.x as f32,
            self.line_end.y as f32,
            self.line_end.z as f32,
        ]
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            position: ORBIT_CENTER,
            spot_direction: DVec3::X,
            line_end: ORBIT_CENTER,
        }
    }
}
