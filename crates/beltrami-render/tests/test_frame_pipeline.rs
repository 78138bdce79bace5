use beltrami_core::{ShaderStage, ViewerError};
use beltrami_math::transform::to_f32_cols;
use beltrami_render::device::ClearMask;
use beltrami_render::{
    DeviceCommand, FrameTransforms, LightState, OrbitMode, PrimitiveKind, RecordingDevice,
    Trackball, UniformValue, ViewProvider, Viewer, ViewerOptions,
};

const SURFACE_VERTICES: u32 = 229_008;
const MARKER_VERTICES: u32 = 47_628;

fn viewer() -> Viewer<RecordingDevice, Trackball> {
    Viewer::init(|| Ok(RecordingDevice::new()), Trackball::new(0.0), ViewerOptions::default())
        .unwrap()
}

fn float(value: Option<UniformValue>) -> f32 {
    match value {
        Some(UniformValue::Float(f)) => f,
        other => panic!("expected float uniform, got {:?}", other),
    }
}

fn vec3(value: Option<UniformValue>) -> [f32; 3] {
    match value {
        Some(UniformValue::Vec3(v)) => v,
        other => panic!("expected vec3 uniform, got {:?}", other),
    }
}

#[test]
fn test_init_uploads_meshes_and_enables_depth() {
    let viewer = viewer();
    assert!(viewer.device().depth_test_enabled());
    assert_eq!(viewer.surface().vertex_count(), SURFACE_VERTICES);
    assert_eq!(viewer.marker().vertex_count(), MARKER_VERTICES);
    assert!(viewer.device().draw_calls().is_empty());
}

#[test]
fn test_init_context_unavailable() {
    let result: Result<Viewer<RecordingDevice, Trackball>, _> = Viewer::init(
        || Err(ViewerError::ContextUnavailable("no adapter".to_string())),
        Trackball::default(),
        ViewerOptions::default(),
    );
    let err = result.err().unwrap();
    assert!(matches!(err, ViewerError::ContextUnavailable(_)));
    assert_eq!(err.user_message(), "Sorry, could not get a graphics context.");
}

#[test]
fn test_init_shader_failure_carries_log() {
    let result = Viewer::init(
        || Ok(RecordingDevice::new().failing_compile(ShaderStage::Fragment, "0:3: syntax error")),
        Trackball::default(),
        ViewerOptions::default(),
    );
    let err = result.err().unwrap();
    assert!(err.is_init_failure());
    assert!(err.user_message().contains("0:3: syntax error"));
}

#[test]
fn test_frame_draw_order() {
    let mut viewer = viewer();
    viewer.device_mut().take_commands();
    viewer.draw(0.0);

    let commands = viewer.device().commands();
    assert_eq!(commands[0], DeviceCommand::ClearColor([0.0, 0.0, 0.0, 1.0]));
    assert_eq!(commands[1], DeviceCommand::Clear(ClearMask::COLOR_AND_DEPTH));

    let draws = viewer.device().draw_calls();
    assert_eq!(draws.len(), 3);
    assert_eq!((draws[0].mode, draws[0].first, draws[0].count), (PrimitiveKind::Lines, 0, 2));
    assert_eq!(draws[1].mode, PrimitiveKind::Triangles);
    assert_eq!(draws[1].count, MARKER_VERTICES);
    assert_eq!(draws[2].mode, PrimitiveKind::Triangles);
    assert_eq!(draws[2].count, SURFACE_VERTICES);

    let line_buffer = viewer.shader().line_buffer;
    assert!(draws[0].attributes.contains(&(0, Some(line_buffer))));
    assert!(draws[1].attributes.contains(&(0, Some(viewer.marker().vertex_buffer()))));
    assert!(draws[1].attributes.contains(&(1, Some(viewer.marker().normal_buffer()))));
    assert!(draws[2].attributes.contains(&(0, Some(viewer.surface().vertex_buffer()))));
    assert!(draws[2].attributes.contains(&(1, Some(viewer.surface().normal_buffer()))));
}

#[test]
fn test_light_uniforms_at_time_zero() {
    let mut viewer = viewer();
    viewer.draw(0.0);
    let device = viewer.device();

    assert_eq!(vec3(device.uniform("lightPosition")), [3.0, 3.0, 0.0]);
    let dir = vec3(device.uniform("spotDirection"));
    assert!((dir[0] + 0.70710677).abs() < 1e-6);
    assert!((dir[1] + 0.70710677).abs() < 1e-6);
    assert_eq!(dir[2], 0.0);

    let cutoffs: Vec<f32> = device
        .uniform_writes("spotCutoff")
        .into_iter()
        .map(|v| float(Some(v)))
        .collect();
    assert_eq!(cutoffs.len(), 2);
    assert!((cutoffs[0] - 40f64.to_radians().cos() as f32).abs() < 1e-7);
    assert!((cutoffs[1] - 20f64.to_radians().cos() as f32).abs() < 1e-7);
    assert_eq!(float(device.uniform("spotCutoff")), cutoffs[1]);
    assert_eq!(float(device.uniform("spotExponent")), 10.0);

    let line = device.buffer(viewer.shader().line_buffer).unwrap();
    assert_eq!(line, &LightState::at_time(0.0, OrbitMode::Faithful).line_vertices()[..]);
}

#[test]
fn test_matrices_follow_camera() {
    let mut viewer = viewer();
    viewer.draw(0.0);
    let expected = FrameTransforms::from_view(viewer.camera().view_matrix());
    assert_eq!(
        viewer.device().uniform("ModelViewProjectionMatrix"),
        Some(UniformValue::Matrix4(to_f32_cols(expected.model_view_projection)))
    );
    assert_eq!(
        viewer.device().uniform("ModelNormalMatrix"),
        Some(UniformValue::Matrix4(to_f32_cols(expected.normal_matrix)))
    );

    let before = viewer.device().uniform("ModelViewProjectionMatrix");
    viewer.camera_mut().begin_drag(0.0, 0.0);
    assert!(viewer.camera_mut().drag_to(0.4, 0.2));
    viewer.camera_mut().end_drag();
    viewer.draw(0.0);
    assert_ne!(viewer.device().uniform("ModelViewProjectionMatrix"), before);
}

#[test]
fn test_marker_regenerated_each_frame() {
    let mut viewer = viewer();
    viewer.draw(0.0);
    let marker = viewer.marker().vertex_buffer();
    let at_zero = viewer.device().buffer(marker).unwrap().to_vec();
    viewer.draw(1.0);
    let at_one = viewer.device().buffer(marker).unwrap().to_vec();

    assert_eq!(at_zero.len(), at_one.len());
    assert_ne!(at_zero, at_one);

    // Every marker vertex sits within the marker radius of the light.
    let light = viewer.scene().light.position;
    for p in at_one.chunks_exact(3) {
        let dx = p[0] as f64 - light.x;
        let dy = p[1] as f64 - light.y;
        let dz = p[2] as f64 - light.z;
        assert!(((dx * dx + dy * dy + dz * dz).sqrt() - 0.25).abs() < 1e-5);
    }
    assert_eq!(viewer.scene().frames, 2);
    assert_eq!(viewer.scene().last_time, 1.0);
}

#[test]
fn test_max_radius_regenerates_and_redraws() {
    let mut viewer = viewer();
    viewer.draw(2.0);
    let surface = viewer.surface().vertex_buffer();
    let before = viewer.device().buffer(surface).unwrap().to_vec();
    viewer.device_mut().take_commands();

    let label = viewer.set_max_radius(2.5);
    assert_eq!(label, "2.50");
    assert_eq!(viewer.scene().options.max_radius, 2.5);

    let uploads = viewer
        .device()
        .commands()
        .iter()
        .filter(|c| {
            matches!(c, DeviceCommand::BufferData { buffer: Some(b), .. } if *b == surface)
        })
        .count();
    assert_eq!(uploads, 1);
    assert_eq!(viewer.device().draw_calls().len(), 3);
    assert_eq!(viewer.device().buffer(surface).unwrap(), &before[..]);
    assert_eq!(viewer.scene().last_time, 2.0);
}

#[test]
fn test_circular_orbit_option() {
    let mut viewer = Viewer::init(
        || Ok(RecordingDevice::new()),
        Trackball::default(),
        ViewerOptions {
            orbit: OrbitMode::Circular,
            max_radius: 1.0,
        },
    )
    .unwrap();
    viewer.draw(std::f64::consts::FRAC_PI_2);
    let p = viewer.scene().light.position;
    assert!(p.x.abs() < 1e-12);
    assert!((p.y - 3.0).abs() < 1e-12);
}

#[test]
fn test_drag_redraws_at_last_time() {
    let mut viewer = viewer();
    viewer.draw(1.5);
    let before = viewer.device().uniform("ModelViewProjectionMatrix");
    viewer.device_mut().take_commands();

    viewer.begin_drag(0.0, 0.0);
    assert!(viewer.drag_to(0.3, -0.2));
    viewer.end_drag();

    assert_eq!(viewer.device().draw_calls().len(), 3);
    assert_eq!(viewer.scene().frames, 2);
    assert_eq!(viewer.scene().last_time, 1.5);
    assert_eq!(vec3(viewer.device().uniform("lightPosition")), {
        let p = LightState::at_time(1.5, OrbitMode::Faithful).position;
        [p.x as f32, p.y as f32, p.z as f32]
    });
    assert_ne!(viewer.device().uniform("ModelViewProjectionMatrix"), before);
}

#[test]
fn test_drag_without_press_does_not_draw() {
    let mut viewer = viewer();
    viewer.draw(0.5);
    viewer.device_mut().take_commands();

    assert!(!viewer.drag_to(0.4, 0.4));
    viewer.begin_drag(0.1, 0.1);
    assert!(!viewer.drag_to(0.1, 0.1));
    assert!(viewer.device().draw_calls().is_empty());
    assert_eq!(viewer.scene().frames, 1);
}
