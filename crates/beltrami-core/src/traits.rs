use crate::error::Result;

/// Validate structural integrity of generated geometry.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
