//! Open-circuit voltage as a function of state of charge.

use crate::error::{CellError, CellResult};
use cf_core::numeric::lerp;

/// Tabulated open-circuit voltage curve over state of charge.
///
/// Samples must cover strictly increasing SOC values with non-decreasing
/// voltage. Evaluation interpolates linearly between samples and clamps to
/// the end samples outside the tabulated span.
#[derive(Debug, Clone)]
pub struct OcvCurve {
    soc: Vec<f64>,
    voltage: Vec<f64>,
}

impl OcvCurve {
    /// Build a curve from (SOC, voltage) samples.
    pub fn new(samples: &[(f64, f64)]) -> CellResult<Self> {
        if samples.len() < 2 {
            return Err(CellError::InvalidArg {
                what: "OCV curve needs at least two samples",
            });
        }
        for window in samples.windows(2) {
            if !(window[1].0 > window[0].0) {
                return Err(CellError::InvalidArg {
                    what: "OCV curve SOC values must be strictly increasing",
                });
            }
            if window[1].1 < window[0].1 {
                return Err(CellError::NonPhysical {
                    what: "OCV curve voltage must be non-decreasing with SOC",
                });
            }
        }
        for &(s, v) in samples {
            if !s.is_finite() || !v.is_finite() {
                return Err(CellError::InvalidArg {
                    what: "OCV curve samples must be finite",
                });
            }
        }
        Ok(Self {
            soc: samples.iter().map(|p| p.0).collect(),
            voltage: samples.iter().map(|p| p.1).collect(),
        })
    }

    /// Open-circuit voltage at the given SOC, clamped to the tabulated span.
    pub fn voltage_at(&self, soc: f64) -> f64 {
        let n = self.soc.len();
        if soc <= self.soc[0] {
            return self.voltage[0];
        }
        if soc >= self.soc[n - 1] {
            return self.voltage[n - 1];
        }
        // partition_point returns the first index with soc[i] > soc
        let hi = self.soc.partition_point(|&s| s <= soc);
        let lo = hi - 1;
        let frac = (soc - self.soc[lo]) / (self.soc[hi] - self.soc[lo]);
        lerp(self.voltage[lo], self.voltage[hi], frac)
    }

    /// Voltage of the first (empty) and last (full) sample.
    pub fn span(&self) -> (f64, f64) {
        (self.voltage[0], *self.voltage.last().expect("nonempty"))
    }
}

impl Default for OcvCurve {
    /// Representative lithium-ion OCV table (single cell, 25 degC).
    fn default() -> Self {
        Self::new(&[
            (0.0, 3.00),
            (0.05, 3.30),
            (0.10, 3.42),
            (0.20, 3.50),
            (0.30, 3.55),
            (0.40, 3.62),
            (0.50, 3.70),
            (0.60, 3.78),
            (0.70, 3.86),
            (0.80, 3.94),
            (0.90, 4.05),
            (1.0, 4.15),
        ])
        .expect("default OCV table is valid")
    }
}
