//! Sampling of one parameter axis.

use serde::{Deserialize, Serialize};

/// One axis of a parameter grid: `start`, advanced by `step` while below
/// (or, if `inclusive`, not above) `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub inclusive: bool,
}

impl ParamRange {
    pub fn closed(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            inclusive: true,
        }
    }

    pub fn half_open(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            inclusive: false,
        }
    }

    fn admits(&self, x: f64) -> bool {
        if self.inclusive {
            x <= self.end
        } else {
            x < self.end
        }
    }

    /// Sample values in order.
    ///
    /// Values are produced by repeated addition, not `start + i * step`, so
    /// the accumulated rounding decides whether a value landing near `end`
    /// is admitted. Grid sizes depend on this.
    ///
    /// Sampling stops early once adding `step` no longer advances the
    /// value, i.e. when `step` is below the float spacing at that point.
    pub fn samples(&self) -> Vec<f64> {
        if self.step.is_nan() || self.step <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut x = self.start;
        while self.admits(x) {
            out.push(x);
            let next = x + self.step;
            if next <= x {
                break;
            }
            x = next;
        }
        out
    }

    /// Number of values [`samples`](Self::samples) yields.
    pub fn count(&self) -> usize {
        self.samples().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_half_open_excludes_end() {
        let r = ParamRange::half_open(0.0, 1.0, 0.25);
        assert_eq!(r.samples(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_closed_includes_exact_end() {
        let r = ParamRange::closed(0.0, 1.0, 0.25);
        assert_eq!(r.samples(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_accumulated_rounding_decides_last_sample() {
        // The last admitted value is ~3.1; the next one (~3.15) exceeds PI.
        let r = ParamRange::closed(0.0, PI, 0.05);
        let samples = r.samples();
        assert_eq!(samples.len(), 63);
        assert!((samples[62] - 3.1).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_step_is_empty() {
        assert!(ParamRange::closed(0.0, 1.0, 0.0).samples().is_empty());
        assert!(ParamRange::closed(0.0, 1.0, -0.1).samples().is_empty());
        assert!(ParamRange::closed(0.0, 1.0, f64::NAN).samples().is_empty());
    }

    #[test]
    fn test_step_below_float_spacing_stops() {
        // At 1e17 neighbouring doubles are 16 apart, so 0.03 is absorbed.
        let r = ParamRange::half_open(1e17, 1e17 + 64.0, 0.03);
        assert_eq!(r.samples(), vec![1e17]);
        assert_eq!(r.count(), 1);
    }
}
