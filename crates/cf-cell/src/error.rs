//! Error types for cell model operations.

use cf_core::error::CfError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a cell model.
#[derive(Error, Debug, Clone)]
pub enum CellError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type CellResult<T> = Result<T, CellError>;

impl From<CellError> for CfError {
    fn from(e: CellError) -> Self {
        match e {
            CellError::NonPhysical { what } => CfError::Invariant { what },
            CellError::InvalidArg { what } => CfError::InvalidArg { what },
        }
    }
}
