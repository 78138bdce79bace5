use beltrami_math::{DMat4, DVec3};
use glam::DQuat;

/// Anything that can supply the view matrix for a frame.
pub trait ViewProvider {
    fn view_matrix(&self) -> DMat4;
}

/// A virtual-trackball rotator driven by pointer drags.
///
/// Pointer positions are given in normalized canvas coordinates: `x` and
/// `y` in `[-1, 1]`, `y` pointing up. Each position is lifted onto a unit
/// hemisphere facing the viewer (points outside the unit disc land on its
/// rim) and the view rotates by the arc between successive positions.
#[derive(Debug, Clone)]
pub struct Trackball {
    rotation: DQuat,
    view_distance: f64,
    drag_from: Option<DVec3>,
}

impl Trackball {
    /// Trackball at rest, rolled by `initial_roll` radians about the view
    /// axis.
    pub fn new(initial_roll: f64) -> Self {
        Self {
            rotation: DQuat::from_rotation_z(initial_roll),
            view_distance: 0.0,
            drag_from: None,
        }
    }

    /// Push the scene `distance` units down the view axis.
    pub fn with_view_distance(mut self, distance: f64) -> Self {
        self.view_distance = distance;
        self
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag_from = Some(project_to_sphere(x, y));
    }

    /// Continue a drag. Returns `true` when the view changed and the scene
    /// should be redrawn.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(from) = self.drag_from else {
            return false;
        };
        let to = project_to_sphere(x, y);
        if from == to {
            return false;
        }
        let delta = DQuat::from_rotation_arc(from, to);
        self.rotation = (delta * self.rotation).normalize();
        self.drag_from = Some(to);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ViewProvider for Trackball {
    fn view_matrix(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, -self.view_distance))
            * DMat4::from_quat(self.rotation)
    }
}

/// Convert a pixel position to normalized canvas coordinates.
pub fn normalized_coords(px: f64, py: f64, width: f64, height: f64) -> (f64, f64) {
    (2.0 * px / width - 1.0, 1.0 - 2.0 * py / height)
}

fn project_to_sphere(x: f64, y: f64) -> DVec3 {
    let d2 = x * x + y * y;
    if d2 <= 1.0 {
        DVec3::new(x, y, (1.0 - d2).sqrt())
    } else {
        DVec3::new(x, y, 0.0).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_default_view_is_identity() {
        let ball = Trackball::default();
        assert!(ball.view_matrix().abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_initial_roll() {
        let ball = Trackball::new(FRAC_PI_2);
        let x = ball.view_matrix().transform_vector3(DVec3::X);
        assert!((x - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_view_distance_translates() {
        let ball = Trackball::new(0.0).with_view_distance(4.0);
        let p = ball.view_matrix().transform_point3(DVec3::ZERO);
        assert!((p - DVec3::new(0.0, 0.0, -4.0)).length() < 1e-12);
    }

    #[test]
    fn test_horizontal_drag_rotates_about_y() {
        let mut ball = Trackball::default();
        ball.begin_drag(0.0, 0.0);
        assert!(ball.drag_to(0.5, 0.0));
        ball.end_drag();

        let axis = ball.rotation().to_axis_angle().0;
        assert!(axis.y.abs() > 0.999, "axis {:?}", axis);
        // Rotation preserves lengths
        let v = ball.view_matrix().transform_vector3(DVec3::new(1.0, 2.0, 3.0));
        assert!((v.length() - DVec3::new(1.0, 2.0, 3.0).length()).abs() < 1e-12);
    }

    #[test]
    fn test_drag_without_begin_does_nothing() {
        let mut ball = Trackball::default();
        assert!(!ball.drag_to(0.3, 0.3));
        assert!(!ball.is_dragging());
        assert!(ball.view_matrix().abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_drag_outside_disc_stays_finite() {
        let mut ball = Trackball::default();
        ball.begin_drag(-3.0, 0.0);
        assert!(ball.drag_to(3.0, 0.1));
        assert!(ball.view_matrix().is_finite());
    }

    #[test]
    fn test_normalized_coords() {
        assert_eq!(normalized_coords(0.0, 0.0, 200.0, 100.0), (-1.0, 1.0));
        assert_eq!(normalized_coords(100.0, 50.0, 200.0, 100.0), (0.0, 0.0));
        assert_eq!(normalized_coords(200.0, 100.0, 200.0, 100.0), (1.0, -1.0));
    }
}
