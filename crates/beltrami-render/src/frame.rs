//! Per-frame pipeline tying camera, light and geometry together.

use std::f64::consts::PI;

use beltrami_core::Result;
use beltrami_geometry::surface::{MarkerSphere, PseudosphericalSurface};
use beltrami_math::transform::{normal_matrix, perspective, to_f32_cols};
use beltrami_math::{DMat4, DVec3, Transform, Vector3};
use beltrami_mesh::{tessellate, SurfaceMesh};
use serde::{Deserialize, Serialize};

use crate::camera::{Trackball, ViewProvider};
use crate::device::{BufferTarget, BufferUsage, ClearMask, GraphicsDevice, PrimitiveKind};
use crate::light::{LightState, OrbitMode};
use crate::model::RenderableMesh;
use crate::shader::ShaderBinding;

pub const FIELD_OF_VIEW: f64 = PI / 6.0;
pub const ASPECT: f64 = 1.0;
pub const NEAR: f64 = 8.0;
pub const FAR: f64 = 15.0;

/// Rotation applied to the camera view before the scene is pushed back.
pub const CORRECTION_AXIS: Vector3 = DVec3::new(0.707, 0.707, 0.0);
pub const CORRECTION_ANGLE: f64 = 0.7;
/// Translation that moves the scene between the clip planes.
pub const CORRECTION_OFFSET: Vector3 = DVec3::new(0.0, 0.0, -10.0);

/// Cutoff half-angle written first each frame, in degrees.
pub const SPOT_CUTOFF_WIDE_DEG: f64 = 40.0;
/// Cutoff half-angle in effect for every draw, in degrees.
pub const SPOT_CUTOFF_DEG: f64 = 20.0;
pub const SPOT_EXPONENT: f32 = 10.0;

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Knobs the embedding application may set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub orbit: OrbitMode,
    /// Value of the "max radius" control. Shown in the label only; the
    /// surface equations do not depend on it.
    pub max_radius: f64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            orbit: OrbitMode::Faithful,
            max_radius: 1.0,
        }
    }
}

/// Mutable state shared across frames. Only [`Viewer::draw`] writes the
/// light; everything else reads it.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    pub light: LightState,
    pub options: ViewerOptions,
    /// Elapsed time of the last frame drawn.
    pub last_time: f64,
    pub frames: u64,
}

/// Model-view-projection and normal matrices for a camera view.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub model_view_projection: DMat4,
    pub normal_matrix: DMat4,
}

impl FrameTransforms {
    pub fn from_view(view: DMat4) -> Self {
        let projection = perspective(FIELD_OF_VIEW, ASPECT, NEAR, FAR);
        let correction = Transform::from_axis_angle(CORRECTION_AXIS, CORRECTION_ANGLE)
            .then(&Transform::from_translation(CORRECTION_OFFSET));
        let model_view_projection = projection * correction.to_mat4() * view;

        Self {
            model_view_projection,
            normal_matrix: normal_matrix(model_view_projection),
        }
    }
}

/// Tessellate the surface for a given "max radius" value.
pub fn surface_mesh(max_radius: f64) -> SurfaceMesh {
    log::debug!("regenerating surface (max radius {:.2})", max_radius);
    tessellate(&PseudosphericalSurface::new())
}

/// Tessellate the light marker around `light`.
pub fn marker_mesh(light: &LightState) -> SurfaceMesh {
    tessellate(&MarkerSphere::at(light.position))
}

fn vec3_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// The running viewer: device, camera, shader, and the two meshes.
pub struct Viewer<D: GraphicsDevice, C: ViewProvider> {
    device: D,
    camera: C,
    shader: ShaderBinding,
    surface: RenderableMesh,
    marker: RenderableMesh,
    scene: SceneState,
}

impl<D: GraphicsDevice, C: ViewProvider> Viewer<D, C> {
    /// Acquire the device, build the shader program, and upload the initial
    /// surface and marker meshes.
    ///
    /// Fails with `ContextUnavailable` when `acquire` does, or with the
    /// compile/link error of the shader build. Nothing is drawn yet.
    pub fn init<F>(acquire: F, camera: C, options: ViewerOptions) -> Result<Self>
    where
        F: FnOnce() -> Result<D>,
    {
        let mut device = acquire()?;
        let shader = ShaderBinding::build_default(&mut device)?;
        log::info!("shader program linked");

        let mut surface = RenderableMesh::new(&mut device, "Surface")?;
        surface.buffer_data(&mut device, &surface_mesh(options.max_radius));

        let scene = SceneState {
            options,
            ..SceneState::default()
        };
        let mut marker = RenderableMesh::new(&mut device, "LightSource")?;
        marker.buffer_data(&mut device, &marker_mesh(&scene.light));

        device.enable_depth_test();
        log::info!(
            "initialized: surface {} vertices, marker {} vertices",
            surface.vertex_count(),
            marker.vertex_count()
        );

        Ok(Self {
            device,
            camera,
            shader,
            surface,
            marker,
            scene,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn shader(&self) -> &ShaderBinding {
        &self.shader
    }

    pub fn surface(&self) -> &RenderableMesh {
        &self.surface
    }

    pub fn marker(&self) -> &RenderableMesh {
        &self.marker
    }

    /// Render one frame at `elapsed` seconds.
    pub fn draw(&mut self, elapsed: f64) {
        self.device.clear_color(CLEAR_COLOR);
        self.device.clear(ClearMask::COLOR_AND_DEPTH);

        let transforms = FrameTransforms::from_view(self.camera.view_matrix());
        let mvp = to_f32_cols(transforms.model_view_projection);
        self.device
            .uniform_matrix4(self.shader.model_view_projection, &mvp);
        self.device
            .uniform_matrix4(self.shader.normal_matrix, &to_f32_cols(transforms.normal_matrix));

        self.move_light(elapsed);

        let light = self.scene.light;
        self.device
            .uniform3(self.shader.spot_direction, vec3_f32(light.spot_direction));
        self.device.uniform1(
            self.shader.spot_cutoff,
            SPOT_CUTOFF_WIDE_DEG.to_radians().cos() as f32,
        );
        self.device.uniform1(self.shader.spot_exponent, SPOT_EXPONENT);

        self.device
            .bind_buffer(BufferTarget::Array, self.shader.line_buffer);
        self.device.buffer_data(
            BufferTarget::Array,
            &light.line_vertices(),
            BufferUsage::StreamDraw,
        );

        self.device.uniform1(
            self.shader.spot_cutoff,
            SPOT_CUTOFF_DEG.to_radians().cos() as f32,
        );
        self.device.uniform1(self.shader.spot_exponent, SPOT_EXPONENT);

        if let Some(index) = self.shader.attrib_vertex {
            self.device.vertex_attrib_pointer(index, 3);
            self.device.enable_vertex_attrib_array(index);
        }
        self.device
            .uniform_matrix4(self.shader.model_view_projection, &mvp);
        self.device.draw_arrays(PrimitiveKind::Lines, 0, 2);

        self.marker.draw(&mut self.device, &self.shader);
        self.surface.draw(&mut self.device, &self.shader);

        self.scene.last_time = elapsed;
        self.scene.frames += 1;
        log::trace!("frame {} at t={:.3}", self.scene.frames, elapsed);
    }

    /// Place the light for `elapsed`, push its uniforms, and rebuild the
    /// marker around it.
    fn move_light(&mut self, elapsed: f64) {
        let light = LightState::at_time(elapsed, self.scene.options.orbit);
        self.scene.light = light;

        self.device
            .uniform3(self.shader.light_position, vec3_f32(light.position));
        self.device
            .uniform3(self.shader.spot_direction, vec3_f32(light.spot_direction));

        self.marker
            .buffer_data(&mut self.device, &marker_mesh(&light));
    }

    /// Handle a change of the "max radius" control: regenerate and upload
    /// the surface, redraw at the last frame time, and return the label
    /// text.
    pub fn set_max_radius(&mut self, max_radius: f64) -> String {
        self.scene.options.max_radius = max_radius;
        self.surface
            .buffer_data(&mut self.device, &surface_mesh(max_radius));
        self.draw(self.scene.last_time);
        format!("{:.2}", max_radius)
    }
}

/// Pointer handling for a trackball-driven viewer. Coordinates are
/// normalized canvas coordinates, see [`crate::camera::normalized_coords`].
impl<D: GraphicsDevice> Viewer<D, Trackball> {
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.camera.begin_drag(x, y);
    }

    /// Rotate the view and redraw at the last frame time. Returns `false`
    /// (and draws nothing) when no drag is active or the pointer did not
    /// move.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        if !self.camera.drag_to(x, y) {
            return false;
        }
        self.draw(self.scene.last_time);
        true
    }

    pub fn end_drag(&mut self) {
        self.camera.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms_of_identity_view() {
        let t = FrameTransforms::from_view(DMat4::IDENTITY);
        // The origin lands at depth 10, inside the [8, 15] clip range.
        let origin = t.model_view_projection.project_point3(DVec3::ZERO);
        assert!(origin.x.abs() < 1e-12 && origin.y.abs() < 1e-12);
        assert!(origin.z > -1.0 && origin.z < 1.0);
    }

    #[test]
    fn test_normal_matrix_is_inverse_transpose() {
        let view = DMat4::from_rotation_y(0.4);
        let t = FrameTransforms::from_view(view);
        let product = t.normal_matrix.transpose() * t.model_view_projection;
        assert!(product.abs_diff_eq(DMat4::IDENTITY, 1e-9));
    }

    #[test]
    fn test_max_radius_does_not_change_geometry() {
        assert_eq!(surface_mesh(1.0), surface_mesh(7.5));
    }

    #[test]
    fn test_default_options() {
        let options = ViewerOptions::default();
        assert_eq!(options.orbit, OrbitMode::Faithful);
        assert_eq!(options.max_radius, 1.0);
    }
}
