//! Cell parameter set with named overrides.

use crate::error::{CellError, CellResult};
use crate::ocv::OcvCurve;

/// One polarization branch of the equivalent circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcBranch {
    /// Branch resistance (ohm)
    pub resistance: f64,
    /// Branch capacitance (farad)
    pub capacitance: f64,
}

impl RcBranch {
    /// Branch time constant (seconds).
    pub fn tau(&self) -> f64 {
        self.resistance * self.capacitance
    }
}

/// Rate-capacity correction per Peukert's law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peukert {
    /// Peukert exponent, 1.0 disables the correction
    pub exponent: f64,
    /// Discharge current at which the rated capacity applies (A)
    pub reference_current: f64,
}

/// Explicit configuration record for a single cell.
///
/// Defaults describe a representative high-capacity lithium-ion cell. Use the
/// `with_*` builders for named overrides; no shared default table is mutated,
/// so independently configured models cannot interfere.
#[derive(Debug, Clone)]
pub struct CellParameters {
    /// Rated capacity (ampere-hours)
    pub capacity_ah: f64,
    /// Charge-direction coulombic efficiency in (0, 1]
    pub coulombic_efficiency: f64,
    /// Rate-capacity correction applied on discharge
    pub peukert: Peukert,
    /// Ohmic resistance at mid SOC (ohm)
    pub r0_mid_ohm: f64,
    /// Fast polarization branch
    pub rc_fast: RcBranch,
    /// Slow polarization branch
    pub rc_slow: RcBranch,
    /// Open-circuit voltage curve
    pub ocv: OcvCurve,
    /// Lower edge of the operating voltage window (V)
    pub v_cut_low: f64,
    /// Upper edge of the operating voltage window (V)
    pub v_cut_high: f64,
    /// State of charge at model construction, in [0, 1]
    pub initial_soc: f64,
}

impl Default for CellParameters {
    fn default() -> Self {
        Self {
            capacity_ah: 60.0,
            coulombic_efficiency: 0.995,
            peukert: Peukert {
                exponent: 1.02,
                reference_current: 60.0,
            },
            r0_mid_ohm: 0.0015,
            rc_fast: RcBranch {
                resistance: 0.0008,
                capacitance: 2_000.0,
            },
            rc_slow: RcBranch {
                resistance: 0.0005,
                capacitance: 60_000.0,
            },
            ocv: OcvCurve::default(),
            v_cut_low: 2.5,
            v_cut_high: 4.2,
            initial_soc: 0.5,
        }
    }
}

impl CellParameters {
    /// Override the rated capacity (Ah).
    pub fn with_capacity_ah(mut self, capacity_ah: f64) -> Self {
        self.capacity_ah = capacity_ah;
        self
    }

    /// Override the initial state of charge (clamped to [0, 1]).
    pub fn with_initial_soc(mut self, soc: f64) -> Self {
        self.initial_soc = soc.clamp(0.0, 1.0);
        self
    }

    /// Override the mid-SOC ohmic resistance (ohm).
    pub fn with_r0_mid_ohm(mut self, r0: f64) -> Self {
        self.r0_mid_ohm = r0;
        self
    }

    /// Override the open-circuit voltage curve.
    pub fn with_ocv(mut self, ocv: OcvCurve) -> Self {
        self.ocv = ocv;
        self
    }

    /// Override both polarization branches.
    pub fn with_rc_branches(mut self, fast: RcBranch, slow: RcBranch) -> Self {
        self.rc_fast = fast;
        self.rc_slow = slow;
        self
    }

    /// Rated capacity as a charge quantity.
    pub fn rated_capacity(&self) -> cf_core::units::Charge {
        cf_core::units::ah(self.capacity_ah)
    }

    /// Rated capacity in coulombs.
    pub fn capacity_coulombs(&self) -> f64 {
        self.capacity_ah * cf_core::units::constants::SECONDS_PER_HOUR
    }

    /// Check the record for physically meaningful values.
    pub fn validate(&self) -> CellResult<()> {
        if !(self.capacity_ah > 0.0) {
            return Err(CellError::NonPhysical {
                what: "capacity must be positive",
            });
        }
        if !(self.coulombic_efficiency > 0.0 && self.coulombic_efficiency <= 1.0) {
            return Err(CellError::NonPhysical {
                what: "coulombic efficiency must be in (0, 1]",
            });
        }
        if !(self.peukert.exponent >= 1.0) {
            return Err(CellError::NonPhysical {
                what: "Peukert exponent must be >= 1",
            });
        }
        if !(self.peukert.reference_current > 0.0) {
            return Err(CellError::NonPhysical {
                what: "Peukert reference current must be positive",
            });
        }
        if !(self.r0_mid_ohm > 0.0) {
            return Err(CellError::NonPhysical {
                what: "ohmic resistance must be positive",
            });
        }
        for branch in [&self.rc_fast, &self.rc_slow] {
            if !(branch.resistance > 0.0 && branch.capacitance > 0.0) {
                return Err(CellError::NonPhysical {
                    what: "RC branch constants must be positive",
                });
            }
        }
        if !(self.v_cut_low < self.v_cut_high) {
            return Err(CellError::NonPhysical {
                what: "voltage window must be ordered low < high",
            });
        }
        if !(0.0..=1.0).contains(&self.initial_soc) {
            return Err(CellError::InvalidArg {
                what: "initial SOC must be in [0, 1]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        CellParameters::default().validate().unwrap();
    }

    #[test]
    fn named_overrides_apply() {
        let params = CellParameters::default()
            .with_capacity_ah(11.2)
            .with_initial_soc(0.8);
        assert_eq!(params.capacity_ah, 11.2);
        assert_eq!(params.initial_soc, 0.8);
        params.validate().unwrap();
    }

    #[test]
    fn initial_soc_override_is_clamped() {
        let params = CellParameters::default().with_initial_soc(1.7);
        assert_eq!(params.initial_soc, 1.0);
    }

    #[test]
    fn rated_capacity_matches_coulombs() {
        use uom::si::electric_charge::coulomb;
        let params = CellParameters::default();
        let q = params.rated_capacity().get::<coulomb>();
        assert!((q - params.capacity_coulombs()).abs() < 1e-6);
    }

    #[test]
    fn rejects_nonpositive_capacity() {
        let params = CellParameters::default().with_capacity_ah(0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn overrides_do_not_leak_between_records() {
        let a = CellParameters::default().with_capacity_ah(1.0);
        let b = CellParameters::default();
        assert_ne!(a.capacity_ah, b.capacity_ah);
    }
}
