//! Beltrami viewer core: errors, tolerances, and shared traits.

pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, ShaderStage, ViewerError};
pub use tolerance::Tolerance;
