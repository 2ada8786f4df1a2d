//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while stepping or running a cell simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<cf_cell::CellError> for SimError {
    fn from(e: cf_cell::CellError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<cf_core::error::CfError> for SimError {
    fn from(e: cf_core::error::CfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
