//! Beltrami viewer geometry: parameter domains, parametric surfaces, and
//! finite-difference normal estimation.

pub mod domain;
pub mod normal;
pub mod surface;

pub use domain::ParamRange;
pub use surface::Surface;
