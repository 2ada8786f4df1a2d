//! Thevenin-style equivalent-circuit cell dynamics.
//!
//! The model tracks state of charge and two polarization branch voltages.
//! Terminal voltage is the output equation
//! `V = OCV(soc) - I * R0(soc) - v_fast - v_slow`.
//!
//! Sign convention: positive applied current discharges the cell, negative
//! current charges it.

use crate::error::{CellError, CellResult};
use crate::params::{CellParameters, RcBranch};

/// Dynamic state of one cell. Also used to carry state rates of change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    /// State of charge, fraction in [0, 1]
    pub soc: f64,
    /// Fast polarization branch voltage (V)
    pub v_rc_fast: f64,
    /// Slow polarization branch voltage (V)
    pub v_rc_slow: f64,
}

impl CellState {
    /// A fully relaxed state at the given SOC.
    pub fn rested(soc: f64) -> Self {
        Self {
            soc,
            v_rc_fast: 0.0,
            v_rc_slow: 0.0,
        }
    }
}

/// Equivalent-circuit cell model over an explicit parameter record.
#[derive(Debug, Clone)]
pub struct CellModel {
    params: CellParameters,
}

impl CellModel {
    /// Create a model after validating the parameter record.
    pub fn new(params: CellParameters) -> CellResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CellParameters {
        &self.params
    }

    /// Relaxed state at the configured initial SOC.
    pub fn initial_state(&self) -> CellState {
        CellState::rested(self.params.initial_soc)
    }

    /// Ohmic resistance at the given SOC.
    ///
    /// U-shaped: rises strongly toward empty and mildly toward full, equal to
    /// the configured mid value at the reference SOC.
    pub fn r0_at(&self, soc: f64) -> f64 {
        const S_REF: f64 = 0.60;
        const A_LOW: f64 = 0.60;
        const B_LOW: f64 = 1.50;
        const A_HIGH: f64 = 0.40;
        const B_HIGH: f64 = 2.00;

        let s = soc.clamp(0.0, 1.0);
        let tl = (1.0 - s).powf(B_LOW);
        let th = s.powf(B_HIGH);
        let tl_ref = (1.0 - S_REF).powf(B_LOW);
        let th_ref = S_REF.powf(B_HIGH);

        let factor = 1.0 + A_LOW * (tl - tl_ref) + A_HIGH * (th - th_ref);
        self.params.r0_mid_ohm * factor
    }

    /// Rate of change of SOC under the applied current (1/s).
    ///
    /// Discharge applies Peukert's rate-capacity correction; charge applies
    /// the coulombic efficiency instead.
    pub fn soc_rate(&self, current_a: f64) -> f64 {
        if current_a == 0.0 {
            return 0.0;
        }
        let q = self.params.capacity_coulombs();
        if current_a > 0.0 {
            let peukert = self.params.peukert;
            let q_eff =
                q * (peukert.reference_current / current_a).powf(peukert.exponent - 1.0);
            -current_a / q_eff
        } else {
            -current_a * self.params.coulombic_efficiency / q
        }
    }

    fn rc_rate(branch: &RcBranch, current_a: f64, v: f64) -> f64 {
        (current_a * branch.resistance - v) / branch.tau()
    }

    /// State derivatives under the applied current.
    pub fn derivatives(&self, state: &CellState, current_a: f64) -> CellState {
        CellState {
            soc: self.soc_rate(current_a),
            v_rc_fast: Self::rc_rate(&self.params.rc_fast, current_a, state.v_rc_fast),
            v_rc_slow: Self::rc_rate(&self.params.rc_slow, current_a, state.v_rc_slow),
        }
    }

    /// Terminal voltage output equation.
    pub fn terminal_voltage(&self, state: &CellState, current_a: f64) -> f64 {
        self.params.ocv.voltage_at(state.soc) - current_a * self.r0_at(state.soc)
            - state.v_rc_fast
            - state.v_rc_slow
    }

    /// Clamp an integrated state back into the physical SOC range.
    pub fn clamp(&self, state: &mut CellState) {
        state.soc = state.soc.clamp(0.0, 1.0);
    }

    /// Reject non-finite states produced by a diverging integration.
    pub fn check_finite(&self, state: &CellState) -> CellResult<()> {
        if state.soc.is_finite() && state.v_rc_fast.is_finite() && state.v_rc_slow.is_finite() {
            Ok(())
        } else {
            Err(CellError::NonPhysical {
                what: "cell state diverged to a non-finite value",
            })
        }
    }
}
