//! Uniform-grid tessellation of parametric surfaces into triangle lists.

use beltrami_geometry::Surface;
use rayon::prelude::*;

use crate::SurfaceMesh;

/// Tessellate `surface` over its sampled domain.
///
/// Each grid sample `(u, v)` is the corner of a cell with step
/// `(du, dv)` taken from the domains. The four corners
///
/// ```text
/// c1 = (u, v)       c2 = (u, v + dv)
/// c3 = (u + du, v)  c4 = (u + du, v + dv)
/// ```
///
/// emit the triangles `(c1, c2, c3)` and `(c2, c4, c3)`, with normal data
/// from [`Surface::normal_at`] at the same corners. Vertices are not
/// shared between cells and nothing is indexed. Non-finite evaluations are
/// emitted unchanged.
///
/// Rows of constant `u` are evaluated in parallel and concatenated in
/// order, so the result matches a sequential pass exactly.
pub fn tessellate(surface: &dyn Surface) -> SurfaceMesh {
    let domain_u = surface.domain_u();
    let domain_v = surface.domain_v();
    let us = domain_u.samples();
    let vs = domain_v.samples();
    let (du, dv) = (domain_u.step, domain_v.step);

    let mut rows: Vec<SurfaceMesh> = us
        .par_iter()
        .map(|&u| tessellate_row(surface, u, &vs, du, dv))
        .collect();

    let mut mesh = SurfaceMesh::with_capacity(us.len() * vs.len() * 6);
    for row in &mut rows {
        mesh.append(row);
    }

    log::debug!(
        "tessellated {}x{} cells into {} vertices",
        us.len(),
        vs.len(),
        mesh.vertex_count()
    );
    mesh
}

fn tessellate_row(surface: &dyn Surface, u: f64, vs: &[f64], du: f64, dv: f64) -> SurfaceMesh {
    let mut row = SurfaceMesh::with_capacity(vs.len() * 6);
    for &v in vs {
        let corners = [(u, v), (u, v + dv), (u + du, v), (u + du, v + dv)];
        let points = corners.map(|(u, v)| surface.point_at(u, v));
        let normals = corners.map(|(u, v)| surface.normal_at(u, v));

        for i in [0, 1, 2, 1, 3, 2] {
            row.push(points[i], normals[i]);
        }
    }
    row
}
