//! Shader program binding: compile, link, and resolve the locations the
//! frame pipeline writes to.

use beltrami_core::{Result, ShaderStage};

use crate::device::{BufferId, GraphicsDevice, ProgramId, UniformLocation};

/// Default vertex stage. Declares the `vertex` and `normal` attributes and
/// the two matrix uniforms.
pub const VERTEX_SHADER_SOURCE: &str = include_str!("../shaders/surface.vert");

/// Default fragment stage. Declares the light and spotlight uniforms.
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../shaders/surface.frag");

pub const ATTRIB_VERTEX: &str = "vertex";
pub const ATTRIB_NORMAL: &str = "normal";
pub const UNIFORM_MVP: &str = "ModelViewProjectionMatrix";
pub const UNIFORM_NORMAL_MATRIX: &str = "ModelNormalMatrix";
pub const UNIFORM_LIGHT_POSITION: &str = "lightPosition";
pub const UNIFORM_SPOT_DIRECTION: &str = "spotDirection";
pub const UNIFORM_SPOT_CUTOFF: &str = "spotCutoff";
pub const UNIFORM_SPOT_EXPONENT: &str = "spotExponent";

/// Linked program with every location the viewer uses, plus the buffer
/// that holds the two-vertex spotlight line.
#[derive(Debug, Clone)]
pub struct ShaderBinding {
    pub program: ProgramId,
    pub attrib_vertex: Option<u32>,
    pub attrib_normal: Option<u32>,
    pub model_view_projection: Option<UniformLocation>,
    pub normal_matrix: Option<UniformLocation>,
    pub light_position: Option<UniformLocation>,
    pub spot_direction: Option<UniformLocation>,
    pub spot_cutoff: Option<UniformLocation>,
    pub spot_exponent: Option<UniformLocation>,
    pub line_buffer: BufferId,
}

impl ShaderBinding {
    /// Build the binding from the default sources.
    pub fn build_default<D: GraphicsDevice>(device: &mut D) -> Result<Self> {
        Self::build(device, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    /// Compile both stages, link, make the program current, and resolve
    /// locations. The first compile or link failure is returned with the
    /// backend's log.
    pub fn build<D: GraphicsDevice>(
        device: &mut D,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let vs = device.compile_shader(ShaderStage::Vertex, vertex_source)?;
        let fs = device.compile_shader(ShaderStage::Fragment, fragment_source)?;
        let program = device.link_program(vs, fs)?;
        device.use_program(program);

        let binding = Self {
            program,
            attrib_vertex: device.attrib_location(program, ATTRIB_VERTEX),
            attrib_normal: device.attrib_location(program, ATTRIB_NORMAL),
            model_view_projection: device.uniform_location(program, UNIFORM_MVP),
            normal_matrix: device.uniform_location(program, UNIFORM_NORMAL_MATRIX),
            light_position: device.uniform_location(program, UNIFORM_LIGHT_POSITION),
            spot_direction: device.uniform_location(program, UNIFORM_SPOT_DIRECTION),
            spot_cutoff: device.uniform_location(program, UNIFORM_SPOT_CUTOFF),
            spot_exponent: device.uniform_location(program, UNIFORM_SPOT_EXPONENT),
            line_buffer: device.create_buffer()?,
        };

        if binding.attrib_vertex.is_none() {
            log::warn!("program has no `{}` attribute; nothing will be drawn", ATTRIB_VERTEX);
        }
        Ok(binding)
    }
}
