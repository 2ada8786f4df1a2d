//! cf-cell: lumped-parameter lithium-ion cell model.
//!
//! Provides:
//! - `CellParameters`: explicit configuration record with named overrides
//! - `OcvCurve`: tabulated open-circuit voltage over state of charge
//! - `CellModel`: Thevenin 2-RC equivalent circuit with Peukert rate
//!   correction and terminal-voltage output equation
//!
//! Positive applied current discharges the cell; negative current charges it.

pub mod error;
pub mod model;
pub mod ocv;
pub mod params;

// Re-exports
pub use error::{CellError, CellResult};
pub use model::{CellModel, CellState};
pub use ocv::OcvCurve;
pub use params::{CellParameters, Peukert, RcBranch};
