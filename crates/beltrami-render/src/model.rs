use beltrami_core::Result;
use beltrami_mesh::SurfaceMesh;

use crate::device::{BufferId, BufferTarget, BufferUsage, GraphicsDevice, PrimitiveKind};
use crate::shader::ShaderBinding;

/// A mesh living in two GPU buffers: positions and normal data.
///
/// The buffers are created once and owned for the life of the model;
/// uploads replace their contents wholesale.
#[derive(Debug, Clone)]
pub struct RenderableMesh {
    pub name: String,
    vertex_buffer: BufferId,
    normal_buffer: BufferId,
    vertex_count: u32,
}

impl RenderableMesh {
    /// Create an empty model. Drawing it before any upload draws nothing.
    pub fn new<D: GraphicsDevice>(device: &mut D, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            vertex_buffer: device.create_buffer()?,
            normal_buffer: device.create_buffer()?,
            vertex_count: 0,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn vertex_buffer(&self) -> BufferId {
        self.vertex_buffer
    }

    pub fn normal_buffer(&self) -> BufferId {
        self.normal_buffer
    }

    /// Replace both buffers with `mesh`.
    pub fn buffer_data<D: GraphicsDevice>(&mut self, device: &mut D, mesh: &SurfaceMesh) {
        device.bind_buffer(BufferTarget::Array, self.vertex_buffer);
        device.buffer_data(BufferTarget::Array, &mesh.vertices, BufferUsage::StreamDraw);

        device.bind_buffer(BufferTarget::Array, self.normal_buffer);
        device.buffer_data(BufferTarget::Array, &mesh.normals, BufferUsage::StreamDraw);

        self.vertex_count = mesh.vertex_count() as u32;
    }

    /// Bind both buffers to the program's attributes and draw the whole
    /// mesh as an unindexed triangle list.
    pub fn draw<D: GraphicsDevice>(&self, device: &mut D, shader: &ShaderBinding) {
        device.bind_buffer(BufferTarget::Array, self.vertex_buffer);
        if let Some(index) = shader.attrib_vertex {
            device.vertex_attrib_pointer(index, 3);
            device.enable_vertex_attrib_array(index);
        }

        device.bind_buffer(BufferTarget::Array, self.normal_buffer);
        if let Some(index) = shader.attrib_normal {
            device.vertex_attrib_pointer(index, 3);
            device.enable_vertex_attrib_array(index);
        }

        device.draw_arrays(PrimitiveKind::Triangles, 0, self.vertex_count);
    }
}
