/// Tolerances used when checking numerically derived quantities.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Tolerance on the length of vectors expected to be unit length
    pub unit: f64,
}

impl Tolerance {
    /// Forward-differenced normals are single precision on upload, so unit
    /// checks are loose.
    pub const DEFAULT_UNIT: f64 = 1e-4;

    pub fn new(unit: f64) -> Self {
        Self { unit }
    }

    pub fn default_precision() -> Self {
        Self {
            unit: Self::DEFAULT_UNIT,
        }
    }

    /// Check if a length is 1 within the unit tolerance
    pub fn is_unit(self, length: f64) -> bool {
        (length - 1.0).abs() < self.unit
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unit() {
        let tol = Tolerance::default();
        assert!(tol.is_unit(1.00005));
        assert!(!tol.is_unit(1.001));
        assert!(!tol.is_unit(f64::NAN));
    }

    #[test]
    fn test_custom_unit_tolerance() {
        let tol = Tolerance::new(1e-2);
        assert!(tol.is_unit(0.995));
        assert!(!tol.is_unit(0.98));
    }
}
