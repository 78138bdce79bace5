pub mod surface_mesh;
pub mod tessellator;

pub use surface_mesh::{MeshSummary, SurfaceMesh};
pub use tessellator::tessellate;
