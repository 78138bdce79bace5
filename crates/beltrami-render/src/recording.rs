//! Headless [`GraphicsDevice`] that records every call.
//!
//! Buffer contents and uniform values are kept so callers can inspect what
//! a real GPU would have received. Compile and link results can be forced to
//! fail, which is how initialization errors are exercised without a driver.

use std::collections::HashMap;

use beltrami_core::{Result, ShaderStage, ViewerError};
use slotmap::SlotMap;

use crate::device::{
    BufferId, BufferTarget, BufferUsage, ClearMask, GraphicsDevice, PrimitiveKind, ProgramId,
    ShaderId, UniformLocation,
};

/// Value last written to a uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Matrix4([f32; 16]),
    Vec3([f32; 3]),
    Float(f32),
}

/// One draw call together with the buffers its enabled attributes read.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub mode: PrimitiveKind,
    pub first: u32,
    pub count: u32,
    pub attributes: Vec<(u32, Option<BufferId>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    CreateBuffer(BufferId),
    BindBuffer(BufferId),
    BufferData {
        buffer: Option<BufferId>,
        len: usize,
        usage: BufferUsage,
    },
    CompileShader(ShaderStage),
    LinkProgram(ProgramId),
    UseProgram(ProgramId),
    VertexAttribPointer {
        index: u32,
        buffer: Option<BufferId>,
        components: u32,
    },
    EnableVertexAttribArray(u32),
    Uniform {
        name: String,
        value: UniformValue,
    },
    ClearColor([f32; 4]),
    Clear(ClearMask),
    EnableDepthTest,
    Draw(DrawCall),
}

struct CompiledShader {
    stage: ShaderStage,
    source: String,
}

struct LinkedProgram {
    attributes: Vec<String>,
    uniforms: HashMap<String, UniformLocation>,
}

struct UniformSlot {
    name: String,
    value: Option<UniformValue>,
}

#[derive(Default)]
pub struct RecordingDevice {
    commands: Vec<DeviceCommand>,
    buffers: SlotMap<BufferId, Vec<f32>>,
    shaders: SlotMap<ShaderId, CompiledShader>,
    programs: SlotMap<ProgramId, LinkedProgram>,
    uniforms: SlotMap<UniformLocation, UniformSlot>,
    bound_array: Option<BufferId>,
    attrib_sources: HashMap<u32, Option<BufferId>>,
    enabled_attribs: Vec<u32>,
    active_program: Option<ProgramId>,
    depth_test: bool,
    fail_compile: Option<(ShaderStage, String)>,
    fail_link: Option<String>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compilation of `stage` fail with `log`.
    pub fn failing_compile(mut self, stage: ShaderStage, log: &str) -> Self {
        self.fail_compile = Some((stage, log.to_string()));
        self
    }

    /// Make linking fail with `log`.
    pub fn failing_link(mut self, log: &str) -> Self {
        self.fail_link = Some(log.to_string());
        self
    }

    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drain the command log, leaving device state intact.
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn draw_calls(&self) -> Vec<&DrawCall> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::Draw(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn buffer(&self, id: BufferId) -> Option<&[f32]> {
        self.buffers.get(id).map(Vec::as_slice)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Current value of a uniform of the active program.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        let program = self.programs.get(self.active_program?)?;
        let location = *program.uniforms.get(name)?;
        self.uniforms.get(location)?.value
    }

    /// Every value written to `name` still in the command log, oldest first.
    pub fn uniform_writes(&self, name: &str) -> Vec<UniformValue> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::Uniform { name: n, value } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    fn set_uniform(&mut self, location: Option<UniformLocation>, value: UniformValue) {
        let Some(slot) = location.and_then(|l| self.uniforms.get_mut(l)) else {
            return;
        };
        slot.value = Some(value);
        let name = slot.name.clone();
        self.commands.push(DeviceCommand::Uniform { name, value });
    }
}

/// Names declared with `keyword` (`attribute` or `uniform`), in order.
fn declared_names<'a>(source: &'a str, keyword: &str) -> Vec<&'a str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| line.split_whitespace().next() == Some(keyword))
        .filter_map(|line| line.split_whitespace().last())
        .map(|name| name.trim_end_matches(';'))
        .collect()
}

impl GraphicsDevice for RecordingDevice {
    fn create_buffer(&mut self) -> Result<BufferId> {
        let id = self.buffers.insert(Vec::new());
        self.commands.push(DeviceCommand::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&mut self, _target: BufferTarget, buffer: BufferId) {
        self.bound_array = Some(buffer);
        self.commands.push(DeviceCommand::BindBuffer(buffer));
    }

    fn buffer_data(&mut self, _target: BufferTarget, data: &[f32], usage: BufferUsage) {
        let buffer = self.bound_array;
        if let Some(contents) = buffer.and_then(|b| self.buffers.get_mut(b)) {
            contents.clear();
            contents.extend_from_slice(data);
        }
        self.commands.push(DeviceCommand::BufferData {
            buffer,
            len: data.len(),
            usage,
        });
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId> {
        self.commands.push(DeviceCommand::CompileShader(stage));
        if let Some((failing, log)) = &self.fail_compile {
            if *failing == stage {
                return Err(ViewerError::ShaderBuild {
                    stage,
                    log: log.clone(),
                });
            }
        }
        if !source.contains("void main") {
            return Err(ViewerError::ShaderBuild {
                stage,
                log: "no main function".to_string(),
            });
        }
        Ok(self.shaders.insert(CompiledShader {
            stage,
            source: source.to_string(),
        }))
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId> {
        if let Some(log) = &self.fail_link {
            return Err(ViewerError::ProgramLink { log: log.clone() });
        }
        let (Some(vs), Some(fs)) = (self.shaders.get(vertex), self.shaders.get(fragment)) else {
            return Err(ViewerError::ProgramLink {
                log: "unknown shader handle".to_string(),
            });
        };
        if vs.stage != ShaderStage::Vertex || fs.stage != ShaderStage::Fragment {
            return Err(ViewerError::ProgramLink {
                log: "stages attached in the wrong slots".to_string(),
            });
        }

        let attributes = declared_names(&vs.source, "attribute")
            .into_iter()
            .map(str::to_string)
            .collect();
        let names: Vec<String> = declared_names(&vs.source, "uniform")
            .into_iter()
            .chain(declared_names(&fs.source, "uniform"))
            .map(str::to_string)
            .collect();

        let mut uniforms = HashMap::new();
        for name in names {
            if uniforms.contains_key(&name) {
                continue;
            }
            let location = self.uniforms.insert(UniformSlot {
                name: name.clone(),
                value: None,
            });
            uniforms.insert(name, location);
        }

        let id = self.programs.insert(LinkedProgram {
            attributes,
            uniforms,
        });
        self.commands.push(DeviceCommand::LinkProgram(id));
        Ok(id)
    }

    fn use_program(&mut self, program: ProgramId) {
        self.active_program = Some(program);
        self.commands.push(DeviceCommand::UseProgram(program));
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        let program = self.programs.get(program)?;
        program
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.programs.get(program)?.uniforms.get(name).copied()
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: u32) {
        self.attrib_sources.insert(index, self.bound_array);
        self.commands.push(DeviceCommand::VertexAttribPointer {
            index,
            buffer: self.bound_array,
            components,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        if !self.enabled_attribs.contains(&index) {
            self.enabled_attribs.push(index);
            self.enabled_attribs.sort_unstable();
        }
        self.commands.push(DeviceCommand::EnableVertexAttribArray(index));
    }

    fn uniform_matrix4(&mut self, location: Option<UniformLocation>, value: &[f32; 16]) {
        self.set_uniform(location, UniformValue::Matrix4(*value));
    }

    fn uniform3(&mut self, location: Option<UniformLocation>, value: [f32; 3]) {
        self.set_uniform(location, UniformValue::Vec3(value));
    }

    fn uniform1(&mut self, location: Option<UniformLocation>, value: f32) {
        self.set_uniform(location, UniformValue::Float(value));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.commands.push(DeviceCommand::ClearColor(rgba));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.commands.push(DeviceCommand::Clear(mask));
    }

    fn enable_depth_test(&mut self) {
        self.depth_test = true;
        self.commands.push(DeviceCommand::EnableDepthTest);
    }

    fn draw_arrays(&mut self, mode: PrimitiveKind, first: u32, count: u32) {
        let attributes = self
            .enabled_attribs
            .iter()
            .map(|&i| (i, self.attrib_sources.get(&i).copied().flatten()))
            .collect();
        self.commands.push(DeviceCommand::Draw(DrawCall {
            mode,
            first,
            count,
            attributes,
        }));
    }
}
