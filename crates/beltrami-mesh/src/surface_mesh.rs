use std::path::Path;

use beltrami_core::traits::Validate;
use beltrami_core::{Result, Tolerance, ViewerError};
use beltrami_math::{Aabb3, DVec3, Point3};
use serde::{Deserialize, Serialize};

/// Unindexed triangle list ready for upload.
///
/// `vertices` and `normals` are parallel flat arrays of `x, y, z` triples:
/// vertex `i` occupies `[3*i, 3*i + 3)` in both, and every three consecutive
/// vertices form one triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
}

impl SurfaceMesh {
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
        }
    }

    /// Append one vertex with its normal data.
    pub fn push(&mut self, position: Point3, normal: DVec3) {
        self.vertices
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    /// Append all vertices of `other`, keeping order.
    pub fn append(&mut self, other: &mut SurfaceMesh) {
        self.vertices.append(&mut other.vertices);
        self.normals.append(&mut other.normals);
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex positions widened back to `f64`.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
    }

    /// Normal data widened back to `f64`.
    pub fn normal_vectors(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.normals
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
    }

    /// Vertices with at least one NaN or infinite coordinate.
    pub fn non_finite_vertex_count(&self) -> usize {
        self.vertices
            .chunks_exact(3)
            .filter(|c| c.iter().any(|x| !x.is_finite()))
            .count()
    }

    /// Normal data whose length is not 1 within `tolerance`. Non-finite
    /// normals count as not unit.
    pub fn non_unit_normal_count(&self, tolerance: Tolerance) -> usize {
        self.normal_vectors()
            .filter(|n| !tolerance.is_unit(n.length()))
            .count()
    }

    /// Bounds of the finite vertices.
    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.positions())
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            vertex_count: self.vertex_count(),
            triangle_count: self.triangle_count(),
            non_finite_vertices: self.non_finite_vertex_count(),
            non_unit_normals: self.non_unit_normal_count(Tolerance::default()),
            bounds: self.bounds(),
        }
    }

    /// Write the mesh as JSON (`{"vertices": [...], "normals": [...]}`).
    ///
    /// JSON has no NaN or infinity, so non-finite components are written
    /// as `null`.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer(writer, self).map_err(|e| ViewerError::Export(e.to_string()))
    }
}

impl Validate for SurfaceMesh {
    fn validate(&self) -> Result<()> {
        if self.vertices.len() != self.normals.len() {
            return Err(ViewerError::InvalidOperation(format!(
                "{} vertex components but {} normal components",
                self.vertices.len(),
                self.normals.len()
            )));
        }
        if self.vertices.len() % 9 != 0 {
            return Err(ViewerError::InvalidOperation(format!(
                "{} vertex components do not form whole triangles",
                self.vertices.len()
            )));
        }
        Ok(())
    }
}

/// Statistics printed by the viewer's summary mode.
#[derive(Debug, Clone, Serialize)]
pub struct MeshSummary {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub non_finite_vertices: usize,
    /// Normals off unit length by more than [`Tolerance::DEFAULT_UNIT`].
    pub non_unit_normals: usize,
    pub bounds: Option<Aabb3>,
}
