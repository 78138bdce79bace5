use crate::Point3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    /// Bounds of the finite points in `points`.
    ///
    /// Tessellation near the domain edges can emit NaN or infinite
    /// coordinates; those points are skipped. Returns `None` when no finite
    /// point remains.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut finite = points.into_iter().filter(|p| p.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }
}
