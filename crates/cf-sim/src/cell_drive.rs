//! Adapter binding a cell model to an applied-current drive.

use crate::drive::CurrentDrive;
use crate::error::SimResult;
use crate::model::TransientModel;
use cf_cell::{CellModel, CellState};

/// A cell model driven by an applied-current binding.
///
/// This is the concrete `TransientModel` the integrators advance: the drive
/// supplies I(t), the cell supplies the state derivatives.
#[derive(Debug, Clone)]
pub struct DrivenCell {
    cell: CellModel,
    drive: CurrentDrive,
}

impl DrivenCell {
    pub fn new(cell: CellModel, drive: CurrentDrive) -> Self {
        Self { cell, drive }
    }

    pub fn cell(&self) -> &CellModel {
        &self.cell
    }

    pub fn drive(&self) -> &CurrentDrive {
        &self.drive
    }

    /// Rebind the applied-current input.
    pub fn set_drive(&mut self, drive: CurrentDrive) {
        self.drive = drive;
    }

    /// Applied current at time t under the bound drive.
    pub fn current_at(&self, t: f64) -> f64 {
        self.drive.current_at(t)
    }

    /// Terminal voltage of the cell at the given state and time.
    pub fn terminal_voltage_at(&self, state: &CellState, t: f64) -> f64 {
        self.cell.terminal_voltage(state, self.current_at(t))
    }
}

impl TransientModel for DrivenCell {
    type State = CellState;

    fn initial_state(&self) -> CellState {
        self.cell.initial_state()
    }

    fn rhs(&mut self, t: f64, x: &CellState) -> SimResult<CellState> {
        let current = self.drive.current_at(t);
        Ok(self.cell.derivatives(x, current))
    }

    fn add(&self, a: &CellState, b: &CellState) -> CellState {
        CellState {
            soc: a.soc + b.soc,
            v_rc_fast: a.v_rc_fast + b.v_rc_fast,
            v_rc_slow: a.v_rc_slow + b.v_rc_slow,
        }
    }

    fn scale(&self, a: &CellState, scale: f64) -> CellState {
        CellState {
            soc: a.soc * scale,
            v_rc_fast: a.v_rc_fast * scale,
            v_rc_slow: a.v_rc_slow * scale,
        }
    }
}
