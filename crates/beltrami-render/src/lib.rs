pub mod camera;
pub mod device;
pub mod frame;
pub mod light;
pub mod model;
pub mod recording;
pub mod shader;

// Re-export main types
pub use camera::{Trackball, ViewProvider};
pub use device::{BufferId, GraphicsDevice, PrimitiveKind};
pub use frame::{FrameTransforms, SceneState, Viewer, ViewerOptions};
pub use light::{LightState, OrbitMode};
pub use model::RenderableMesh;
pub use recording::{DeviceCommand, DrawCall, RecordingDevice, UniformValue};
pub use shader::ShaderBinding;
