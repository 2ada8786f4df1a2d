//! Stateful stepping session over a driven cell model.

use crate::cell_drive::DrivenCell;
use crate::drive::CurrentDrive;
use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorType;
use crate::model::TransientModel;
use cf_cell::{CellModel, CellParameters, CellState};
use cf_core::numeric::ensure_finite;

/// Snapshot returned by each step call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReading {
    /// State of charge, fraction in [0, 1]
    pub soc: f64,
    /// Applied current, echoed back exactly (A)
    pub current: f64,
    /// Terminal voltage at the end of the step (V)
    pub voltage: f64,
}

/// Options for a stepping session.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorOptions {
    /// Evaluation points per step, including both interval endpoints.
    ///
    /// The default of 2 integrates each step as a single interval; higher
    /// values raise intra-step resolution without changing the step contract.
    pub eval_points: usize,
    /// Integrator used for each step.
    pub integrator: IntegratorType,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            eval_points: 2,
            integrator: IntegratorType::default(),
        }
    }
}

/// Interactive simulation session: one cell advanced strictly forward in
/// time under a sequence of externally chosen constant currents.
///
/// Each `step` call solves the cell dynamics over `[clock, clock+duration]`
/// with the current input bound to the given value, advances the clock, and
/// replaces the retained state. Positive current discharges, negative
/// current charges.
pub struct BatterySimulator {
    model: DrivenCell,
    state: CellState,
    time_s: f64,
    last: StepReading,
    options: SimulatorOptions,
}

impl BatterySimulator {
    /// Session over the default cell parameterization.
    pub fn new() -> SimResult<Self> {
        Self::with_parameters(CellParameters::default())
    }

    /// Session over an explicit parameter record.
    pub fn with_parameters(params: CellParameters) -> SimResult<Self> {
        Self::with_options(params, SimulatorOptions::default())
    }

    /// Session with explicit stepping options.
    pub fn with_options(params: CellParameters, options: SimulatorOptions) -> SimResult<Self> {
        if options.eval_points < 2 {
            return Err(SimError::InvalidArg {
                what: "eval_points must be at least 2 (the interval endpoints)",
            });
        }

        let cell = CellModel::new(params)?;
        let model = DrivenCell::new(cell, CurrentDrive::Constant(0.0));
        let state = model.initial_state();
        let mut sim = Self {
            model,
            state,
            time_s: 0.0,
            last: StepReading {
                soc: 0.0,
                current: 0.0,
                voltage: 0.0,
            },
            options,
        };

        // Near-zero-duration solve at zero current to materialize the
        // baseline reading. The clock stays at zero.
        sim.solve(0.0, 1e-6)?;
        sim.time_s = 0.0;
        Ok(sim)
    }

    /// Advance the session by `duration_s` seconds at `current_a` amperes.
    ///
    /// A zero-duration call is an explicit read: it returns the retained
    /// state evaluated at the given current without invoking the integrator
    /// and leaves the clock unchanged.
    pub fn step(&mut self, current_a: f64, duration_s: f64) -> SimResult<StepReading> {
        ensure_finite(current_a, "applied current")?;
        ensure_finite(duration_s, "step duration")?;
        if duration_s < 0.0 {
            return Err(SimError::InvalidArg {
                what: "step duration must be non-negative",
            });
        }

        if duration_s == 0.0 {
            let reading = StepReading {
                soc: self.state.soc,
                current: current_a,
                voltage: self.model.cell().terminal_voltage(&self.state, current_a),
            };
            self.last = reading;
            return Ok(reading);
        }

        self.solve(current_a, duration_s)
    }

    fn solve(&mut self, current_a: f64, duration_s: f64) -> SimResult<StepReading> {
        self.model.set_drive(CurrentDrive::Constant(current_a));

        let substeps = self.options.eval_points - 1;
        let dt = duration_s / substeps as f64;
        let mut t = self.time_s;
        let mut x = self.state;

        for _ in 0..substeps {
            x = self.options.integrator.step(&mut self.model, t, &x, dt)?;
            self.model.cell().clamp(&mut x);
            self.model.cell().check_finite(&x)?;
            t += dt;
        }

        self.time_s += duration_s;
        self.state = x;

        let reading = StepReading {
            soc: self.state.soc,
            current: current_a,
            voltage: self.model.cell().terminal_voltage(&self.state, current_a),
        };
        self.last = reading;
        tracing::debug!(
            t = self.time_s,
            current = current_a,
            soc = reading.soc,
            voltage = reading.voltage,
            "step complete"
        );
        Ok(reading)
    }

    /// Simulation clock (seconds since session start).
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// State of charge from the most recent reading.
    pub fn soc(&self) -> f64 {
        self.last.soc
    }

    /// Terminal voltage from the most recent reading.
    pub fn voltage(&self) -> f64 {
        self.last.voltage
    }

    /// The most recent reading.
    pub fn last_reading(&self) -> StepReading {
        self.last
    }

    /// The underlying cell model.
    pub fn cell(&self) -> &CellModel {
        self.model.cell()
    }
}
