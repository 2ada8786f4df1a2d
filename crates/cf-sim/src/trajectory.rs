//! Whole-trajectory profile runs and result recording.

use crate::cell_drive::DrivenCell;
use crate::drive::{CurrentDrive, CurrentProfile};
use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorType;
use crate::model::TransientModel;
use cf_cell::CellModel;

/// Options for a profile run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Output time resolution (seconds)
    pub time_resolution: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            time_resolution: 1.0,
            max_steps: 1_000_000,
            integrator: IntegratorType::default(),
        }
    }
}

/// Aligned traces extracted from a profile run.
///
/// All four vectors have equal length; `time` is strictly increasing.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    /// Time points (seconds)
    pub time: Vec<f64>,
    /// Applied current at each time point (A)
    pub current: Vec<f64>,
    /// Terminal voltage at each time point (V)
    pub voltage: Vec<f64>,
    /// State of charge at each time point
    pub soc: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Solve a cell over a whole current profile in one pass.
///
/// Installs the profile as the model's current drive, integrates from the
/// profile's first to last time sample at the configured resolution, and
/// records the four aligned traces at every evaluation point. The final
/// step is shortened when the span is not an exact multiple of the
/// resolution, so the last sample always lands on the profile's end time.
///
/// This trades interactivity for one-shot efficiency: use it when the whole
/// profile is known in advance, and [`crate::BatterySimulator`] when it is
/// not.
pub fn run_profile(
    cell: &CellModel,
    profile: &CurrentProfile,
    opts: &RunOptions,
) -> SimResult<Trajectory> {
    if !(opts.time_resolution > 0.0) || !opts.time_resolution.is_finite() {
        return Err(SimError::InvalidArg {
            what: "time_resolution must be positive",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }

    let mut model = DrivenCell::new(cell.clone(), CurrentDrive::Profile(profile.clone()));

    let t_start = profile.start_time();
    let t_end = profile.end_time();
    let span = t_end - t_start;
    tracing::debug!(t_start, t_end, resolution = opts.time_resolution, "profile run");

    let mut t = t_start;
    let mut x = model.initial_state();

    let mut out = Trajectory::default();
    record(&mut out, &model, t, &x);

    let mut step = 0;
    // Strict inequality with a span-relative guard so accumulated rounding
    // does not produce a trailing near-zero step.
    while t < t_end - 1e-12 * span.max(1.0) {
        if step >= opts.max_steps {
            return Err(SimError::InvalidArg {
                what: "profile run exceeded max_steps",
            });
        }
        let dt = opts.time_resolution.min(t_end - t);
        x = opts.integrator.step(&mut model, t, &x, dt)?;
        model.cell().clamp(&mut x);
        model.cell().check_finite(&x)?;
        t += dt;
        step += 1;
        record(&mut out, &model, t, &x);
    }

    Ok(out)
}

fn record(out: &mut Trajectory, model: &DrivenCell, t: f64, x: &cf_cell::CellState) {
    let current = model.current_at(t);
    out.time.push(t);
    out.current.push(current);
    out.voltage.push(model.cell().terminal_voltage(x, current));
    out.soc.push(x.soc);
}
