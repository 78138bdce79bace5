//! Graphics device contract.
//!
//! The viewer talks to the GPU only through [`GraphicsDevice`], a small
//! subset of a GL-style immediate API: array buffers of `f32`, a single
//! shader program, uniforms, and unindexed draws. Handles are slotmap keys
//! so a backend can keep its native objects in a `SlotMap`.

use beltrami_core::{Result, ShaderStage};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle of a GPU buffer object.
    pub struct BufferId;
    /// Handle of a compiled shader stage.
    pub struct ShaderId;
    /// Handle of a linked program.
    pub struct ProgramId;
    /// Handle of a resolved uniform.
    pub struct UniformLocation;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferTarget {
    Array,
}

/// Hint passed with every upload. Contents are always replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferUsage {
    StaticDraw,
    StreamDraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Triangles,
    Lines,
}

/// Which buffers a clear touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR_AND_DEPTH: ClearMask = ClearMask {
        color: true,
        depth: true,
    };
}

/// GL-style rendering surface.
///
/// Uniform setters accept `None` locations and ignore them, the way GL
/// ignores location `-1`. Attribute locations are `None` when the program
/// does not declare (or the compiler eliminated) the attribute.
pub trait GraphicsDevice {
    fn create_buffer(&mut self) -> Result<BufferId>;

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId);

    /// Replace the contents of the buffer bound to `target`.
    fn buffer_data(&mut self, target: BufferTarget, data: &[f32], usage: BufferUsage);

    /// Compile one stage. Fails with [`ViewerError::ShaderBuild`] carrying
    /// the compiler log.
    ///
    /// [`ViewerError::ShaderBuild`]: beltrami_core::ViewerError::ShaderBuild
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId>;

    /// Link two stages. Fails with [`ViewerError::ProgramLink`] carrying the
    /// linker log.
    ///
    /// [`ViewerError::ProgramLink`]: beltrami_core::ViewerError::ProgramLink
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId>;

    fn use_program(&mut self, program: ProgramId);

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Source attribute `index` from the bound array buffer as tightly
    /// packed `f32` tuples of `components`.
    fn vertex_attrib_pointer(&mut self, index: u32, components: u32);

    fn enable_vertex_attrib_array(&mut self, index: u32);

    /// Upload a column-major 4x4 matrix.
    fn uniform_matrix4(&mut self, location: Option<UniformLocation>, value: &[f32; 16]);

    fn uniform3(&mut self, location: Option<UniformLocation>, value: [f32; 3]);

    fn uniform1(&mut self, location: Option<UniformLocation>, value: f32);

    fn clear_color(&mut self, rgba: [f32; 4]);

    fn clear(&mut self, mask: ClearMask);

    fn enable_depth_test(&mut self);

    /// Draw `count` vertices starting at `first`. A zero count is a valid
    /// no-op.
    fn draw_arrays(&mut self, mode: PrimitiveKind, first: u32, count: u32);
}
