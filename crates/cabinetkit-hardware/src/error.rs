//! Catalogue errors
//!
//! Incompatible hardware is not an error; ranking reports it as a rejected
//! candidate. These cover lookups and malformed catalogue files.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("Fitting not found: {0}")]
    FittingNotFound(String),

    #[error("Fitting already exists: {0}")]
    DuplicateFitting(String),

    /// Non-positive capacity or price, inverted thickness range
    #[error("Invalid fitting {id}: {reason}")]
    InvalidFitting { id: String, reason: String },

    #[error("catalogue file: {0}")]
    IoError(#[from] io::Error),

    #[error("catalogue JSON: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type HardwareResult<T> = Result<T, HardwareError>;
