//! Transient simulation framework for battery cells.
//!
//! Provides:
//! - Interactive stepping sessions (`BatterySimulator`) for workloads where
//!   the future applied current is not known in advance
//! - One-shot profile runs (`run_profile`) extracting aligned
//!   time/current/voltage/SOC traces
//! - Piecewise-linear current profiles with a cyclic stepped builder
//! - Fixed-step RK4 and forward Euler integrators over a pluggable
//!   `TransientModel` trait

pub mod cell_drive;
pub mod drive;
pub mod error;
pub mod integrator;
pub mod model;
pub mod stepper;
pub mod trajectory;

// Re-exports for public API
pub use cell_drive::DrivenCell;
pub use drive::{CurrentDrive, CurrentProfile};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, IntegratorType, Rk4};
pub use model::TransientModel;
pub use stepper::{BatterySimulator, SimulatorOptions, StepReading};
pub use trajectory::{RunOptions, Trajectory, run_profile};
